//! Log subcommands

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::{ColoredString, Colorize};
use pulse_client::MonitorClient;
use pulse_core::domain::log::{InterfaceLog, LogStatus};
use pulse_core::dto::log::{CreateLog, LogQuery};
use uuid::Uuid;

use crate::config::Config;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// List log entries
    List {
        /// Filter by exact status (Success, Failure, Warning)
        #[arg(long)]
        status: Option<String>,
        /// Filter by interface name substring (case-insensitive)
        #[arg(long)]
        interface: Option<String>,
        /// Filter by exact integration key
        #[arg(long)]
        key: Option<String>,
        /// Page to fetch (1-based)
        #[arg(long)]
        page: Option<u32>,
        /// Entries per page
        #[arg(long)]
        limit: Option<u32>,
        /// Sort specification, e.g. createdAt or -createdAt
        #[arg(long)]
        sort: Option<String>,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Record a new log entry
    Add {
        /// Interface name
        #[arg(long)]
        interface: String,
        /// Integration key
        #[arg(long)]
        key: String,
        /// Status (Success, Failure, Warning)
        #[arg(long)]
        status: String,
        /// Optional free-text message
        #[arg(long)]
        message: Option<String>,
    },
    /// Show a single log entry
    Get {
        /// Entry ID
        id: Uuid,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle(command: LogsCommands, config: &Config) -> Result<()> {
    let client = MonitorClient::new(&config.monitor_url);

    match command {
        LogsCommands::List {
            status,
            interface,
            key,
            page,
            limit,
            sort,
            json,
        } => {
            let mut query = LogQuery::default();
            query.status = status;
            query.interface_name = interface;
            query.integration_key = key;
            query.page = page.map(|p| p.to_string());
            query.limit = limit.map(|l| l.to_string());
            query.sort = sort;

            let result = client
                .list_logs(&query)
                .await
                .context("Failed to list logs")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            for entry in &result.logs {
                print_entry(entry);
            }
            println!(
                "\nPage {} of {} ({} shown)",
                result.current_page,
                result.total_pages,
                result.logs.len()
            );

            Ok(())
        }
        LogsCommands::Add {
            interface,
            key,
            status,
            message,
        } => {
            let entry = client
                .create_log(CreateLog {
                    interface_name: interface,
                    integration_key: key,
                    status,
                    message,
                    created_at: None,
                })
                .await
                .context("Failed to record log entry")?;

            println!("Recorded {} entry {}", colored_status(entry.status), entry.id);

            Ok(())
        }
        LogsCommands::Get { id, json } => {
            let entry = client
                .get_log(id)
                .await
                .context("Failed to fetch log entry")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
                return Ok(());
            }

            print_entry(&entry);
            if let Some(message) = &entry.message {
                println!("  {}", message);
            }

            Ok(())
        }
    }
}

fn print_entry(entry: &InterfaceLog) {
    println!(
        "{}  {:<7}  {:<24}  {:<16}  {}",
        entry.created_at.format("%Y-%m-%d %H:%M:%S"),
        colored_status(entry.status),
        entry.interface_name,
        entry.integration_key,
        entry.id
    );
}

fn colored_status(status: LogStatus) -> ColoredString {
    match status {
        LogStatus::Success => status.as_str().green(),
        LogStatus::Failure => status.as_str().red(),
        LogStatus::Warning => status.as_str().yellow(),
    }
}
