//! Log-related API endpoints

use pulse_core::domain::log::InterfaceLog;
use pulse_core::dto::log::{CreateLog, LogPage, LogQuery, StatusSummary};
use uuid::Uuid;

use crate::MonitorClient;
use crate::error::Result;

impl MonitorClient {
    /// List log entries with filters, sorting, and pagination
    ///
    /// # Example
    /// ```no_run
    /// # use pulse_client::MonitorClient;
    /// # use pulse_core::dto::log::LogQuery;
    /// # use pulse_core::domain::log::LogStatus;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = MonitorClient::new("http://localhost:8080");
    /// let page = client.list_logs(
    ///     &LogQuery::default().with_status(LogStatus::Failure).with_limit(20),
    /// ).await?;
    /// println!("{} entries on page {}", page.logs.len(), page.current_page);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_logs(&self, query: &LogQuery) -> Result<LogPage> {
        let url = format!("{}/api/logs", self.base_url);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).query(query).send().await?;

        self.handle_response(response).await
    }

    /// Record a new log entry
    ///
    /// # Returns
    /// The created entry, with its assigned id and timestamp
    pub async fn create_log(&self, req: CreateLog) -> Result<InterfaceLog> {
        let url = format!("{}/api/logs", self.base_url);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Get a single log entry by ID
    pub async fn get_log(&self, id: Uuid) -> Result<InterfaceLog> {
        let url = format!("{}/api/logs/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get status counts over a trailing window
    ///
    /// # Arguments
    /// * `hours` - Window length; the monitor defaults to 24 when omitted
    pub async fn summary(&self, hours: Option<i64>) -> Result<StatusSummary> {
        let url = format!("{}/api/logs/summary", self.base_url);

        let mut request = self.client.get(&url);
        if let Some(hours) = hours {
            request = request.query(&[("hours", hours)]);
        }

        let response = request.send().await?;

        self.handle_response(response).await
    }
}
