//! Connection establishment with bounded retry.
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is the
//! acquire/release seam both front-ends share: the menu holds it for the
//! process lifetime, API handlers check connections out per request.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DbConfig;
use crate::error::ConnectError;

/// Maximum connection attempts before giving up.
pub const MAX_ATTEMPTS: u32 = 5;

/// Fixed delay between attempts. No backoff, no jitter.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Per-attempt connect timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pool cap. Kept low: one interactive session or a light API load.
const MAX_CONNECTIONS: u32 = 5;

/// Connect to Postgres, retrying up to [`MAX_ATTEMPTS`] times with a fixed
/// [`RETRY_DELAY`] between attempts.
///
/// Emits one status line per attempt. On exhaustion the returned
/// [`ConnectError`] carries the last underlying error and the attempted
/// parameters (the password is never part of it).
pub async fn connect_pool(config: &DbConfig) -> Result<PgPool, ConnectError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        tracing::info!(
            "Attempting to connect to PostgreSQL at {}:{} (attempt {}/{})",
            config.host,
            config.port,
            attempt,
            MAX_ATTEMPTS
        );

        match try_connect(config).await {
            Ok(pool) => {
                tracing::info!("Connected to database '{}'", config.database);
                return Ok(pool);
            }
            Err(err) if attempt < MAX_ATTEMPTS => {
                tracing::warn!(
                    "Attempt {}/{} failed: {}; retrying in {}s",
                    attempt,
                    MAX_ATTEMPTS,
                    err,
                    RETRY_DELAY.as_secs()
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(err) => {
                return Err(ConnectError {
                    host: config.host.clone(),
                    port: config.port,
                    database: config.database.clone(),
                    user: config.user.clone(),
                    attempts: MAX_ATTEMPTS,
                    source: err,
                });
            }
        }
    }
}

async fn try_connect(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(CONNECT_TIMEOUT)
        .connect_with(config.connect_options())
        .await
}
