//! CLI configuration

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the monitor service
    pub monitor_url: String,
}
