//! Log DTOs for the monitor API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::log::{InterfaceLog, LogStatus};

/// Request to record a new interface log entry.
///
/// All fields are defaulted at the serde layer so that a missing required
/// field reaches the ingestion validator (and comes back as a validation
/// failure) instead of dying inside the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateLog {
    pub interface_name: String,
    pub integration_key: String,
    pub status: String,
    pub message: Option<String>,
    /// Honored when supplied; otherwise the monitor stamps insertion time.
    pub created_at: Option<DateTime<Utc>>,
}

/// Filter, sort, and pagination parameters accepted by the list endpoint.
///
/// Deliberately loosely typed: every field is an optional string, and
/// malformed values degrade to the defaults rather than erroring. See
/// [`crate::query::QueryPlan`] for the normalization rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogQuery {
    pub status: Option<String>,
    pub interface_name: Option<String>,
    pub integration_key: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

impl LogQuery {
    /// Filters to an exact status value.
    #[must_use]
    pub fn with_status(mut self, status: LogStatus) -> Self {
        self.status = Some(status.as_str().to_string());
        self
    }

    /// Filters to entries whose interface name contains `needle`
    /// (case-insensitive).
    #[must_use]
    pub fn with_interface_name(mut self, needle: impl Into<String>) -> Self {
        self.interface_name = Some(needle.into());
        self
    }

    /// Filters to an exact integration key.
    #[must_use]
    pub fn with_integration_key(mut self, key: impl Into<String>) -> Self {
        self.integration_key = Some(key.into());
        self
    }

    /// Restricts to entries created within `[start, end]` (inclusive).
    #[must_use]
    pub fn with_date_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start.to_rfc3339());
        self.end_date = Some(end.to_rfc3339());
        self
    }

    /// Requests a specific page (1-based).
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.to_string());
        self
    }

    /// Caps the number of entries per page.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Sets the sort specification (`field` or `-field` for descending).
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// One page of log entries plus the pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    pub logs: Vec<InterfaceLog>,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Per-status entry counts over the summary window.
///
/// Every status is always present, even at zero occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusSummary {
    pub success: i64,
    pub failure: i64,
    pub warning: i64,
}

impl StatusSummary {
    /// Returns the count for a single status.
    pub const fn count(&self, status: LogStatus) -> i64 {
        match status {
            LogStatus::Success => self.success,
            LogStatus::Failure => self.failure,
            LogStatus::Warning => self.warning,
        }
    }

    /// Total entries across all statuses.
    pub const fn total(&self) -> i64 {
        self.success + self.failure + self.warning
    }
}
