//! HTTP server command for the phonedir API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use phonedir_core::{connect_pool, DbConfig};
use phonedir_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "PHONEDIR_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = DbConfig::from_env()?;
    let pool = connect_pool(&config)
        .await
        .context("Failed to connect to the contacts database")?;

    tracing::info!("Starting phonedir API on {}", args.bind);

    run_server(
        pool,
        ServerConfig {
            bind_addr: args.bind,
            cors_permissive: args.cors_permissive,
        },
    )
    .await
    .context("Server error")?;

    Ok(())
}
