//! phonedir CLI - contact directory over PostgreSQL
//!
//! Two front-ends over one shared data-access layer:
//! - `phonedir menu` runs the interactive numbered menu
//! - `phonedir serve` runs the HTTP/JSON API

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod menu;
mod serve;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "phonedir",
    author,
    version,
    about = "Contact directory over PostgreSQL with an interactive menu and a JSON API"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the interactive directory menu
    Menu,
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(clap::Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(cli.debug)?;

    match cli.command {
        Commands::Menu => menu::run().await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(args.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
