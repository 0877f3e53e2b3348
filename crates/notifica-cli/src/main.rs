//! Notifica CLI - a subscriber's inbox in the terminal
//!
//! Connection settings come from `NOTIFICA_*` variables (or a `.env` file),
//! overridable per invocation with global flags.

mod cli;
mod commands;
mod error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_config;
use crate::commands::count::run_count;
use crate::commands::list::run_list;
use crate::commands::read::{run_read, run_read_all};
use crate::commands::watch::run_watch;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notifica=info,notifica_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.connection)?;
    tracing::debug!(?config, "Resolved configuration");

    match cli.command {
        Commands::List {
            pages,
            unread,
            json,
        } => run_list(config, pages, unread, json).await?,
        Commands::Count { json } => run_count(config, json).await?,
        Commands::Read { id } => run_read(config, &id).await?,
        Commands::ReadAll => run_read_all(config).await?,
        Commands::Watch { interval_ms } => run_watch(config, interval_ms).await?,
    }

    Ok(())
}
