//! Pulse HTTP Client
//!
//! Typed client for the Pulse monitor API. The CLI and external automation
//! both go through this crate, so the monitor's wire contract is encoded in
//! exactly one place.
//!
//! # Example
//!
//! ```no_run
//! use pulse_client::MonitorClient;
//! use pulse_core::dto::log::CreateLog;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = MonitorClient::new("http://localhost:8080");
//!
//!     let entry = client.create_log(CreateLog {
//!         interface_name: "payment-gateway".to_string(),
//!         integration_key: "pg-001".to_string(),
//!         status: "Success".to_string(),
//!         ..Default::default()
//!     }).await?;
//!
//!     println!("Recorded entry: {}", entry.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod logs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Pulse monitor API.
///
/// Covers the full surface: log listing, detail lookup, ingestion, and the
/// status summary. Endpoint methods live in [`logs`](self).
#[derive(Debug, Clone)]
pub struct MonitorClient {
    /// Base URL of the monitor, stored without a trailing slash.
    base_url: String,
    client: Client,
}

impl MonitorClient {
    /// Creates a client for the monitor at `base_url`
    /// (e.g. `"http://localhost:8080"`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Creates a client on top of a preconfigured [`reqwest::Client`], for
    /// callers that need custom timeouts, proxies, or TLS settings.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// The monitor base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turns a monitor response into `T` or a [`ClientError`].
    ///
    /// Non-2xx responses become [`ClientError::ApiError`] carrying the
    /// status code and whatever body the monitor sent.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = MonitorClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = MonitorClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = MonitorClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
