//! CLI command definitions and dispatch

pub mod logs;
pub mod summary;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect and record interface log entries
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
    /// Show status counts over a trailing window
    Summary {
        /// Window length in hours (default: 24)
        #[arg(long)]
        hours: Option<i64>,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Logs { command } => logs::handle(command, config).await,
        Commands::Summary { hours, json } => summary::handle(hours, json, config).await,
    }
}
