//! Database configuration sourced from the environment.

use std::env;
use std::fmt;

use sqlx::postgres::PgConnectOptions;

use crate::error::ConfigError;

/// Connection parameters for the contacts database.
///
/// Every field is read from an environment variable with a documented
/// default, so a stock local Postgres works with no configuration at all:
///
/// | Variable            | Default           |
/// |---------------------|-------------------|
/// | `DATABASE_HOST`     | `localhost`       |
/// | `DATABASE_PORT`     | `5432`            |
/// | `DATABASE_NAME`     | `phone_directory` |
/// | `DATABASE_USER`     | `postgres`        |
/// | `DATABASE_PASSWORD` | `postgres`        |
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    password: String,
}

impl DbConfig {
    /// Read configuration from the environment, applying defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_raw = env::var("DATABASE_PORT").unwrap_or_else(|_| "5432".to_string());
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort { value: port_raw })?;

        Ok(Self {
            host: env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port,
            database: env::var("DATABASE_NAME").unwrap_or_else(|_| "phone_directory".to_string()),
            user: env::var("DATABASE_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: env::var("DATABASE_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
        })
    }

    /// Connection options for sqlx. The only place the password leaves
    /// this struct.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
