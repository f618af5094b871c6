//! Pulse CLI
//!
//! Command-line interface for the Pulse monitor.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Pulse interface monitoring CLI", long_about = None)]
struct Cli {
    /// Monitor URL
    #[arg(
        long,
        env = "PULSE_MONITOR_URL",
        default_value = "http://localhost:8080"
    )]
    monitor_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        monitor_url: cli.monitor_url,
    };

    handle_command(cli.command, &config).await
}
