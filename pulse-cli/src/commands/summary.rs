//! Summary subcommand

use anyhow::{Context, Result};
use colored::Colorize;
use pulse_client::MonitorClient;

use crate::config::Config;

pub async fn handle(hours: Option<i64>, json: bool, config: &Config) -> Result<()> {
    let client = MonitorClient::new(&config.monitor_url);

    let summary = client
        .summary(hours)
        .await
        .context("Failed to fetch summary")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Status summary for the last {} hour(s):", hours.unwrap_or(24));
    println!("  {}: {}", "Success".green(), summary.success);
    println!("  {}: {}", "Failure".red(), summary.failure);
    println!("  {}: {}", "Warning".yellow(), summary.warning);
    println!("  Total: {}", summary.total());

    Ok(())
}
