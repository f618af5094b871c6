//! Interface log domain types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A status event recorded for an external integration.
///
/// Entries are append-only: once stored they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceLog {
    pub id: Uuid,
    pub interface_name: String,
    pub integration_key: String,
    pub status: LogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Outcome reported by an integration.
///
/// The single source of truth for status values: ingestion validation,
/// storage encoding, and summary initialization all go through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogStatus {
    Success,
    Failure,
    Warning,
}

impl LogStatus {
    /// All known statuses, in summary display order.
    pub const ALL: [LogStatus; 3] = [LogStatus::Success, LogStatus::Failure, LogStatus::Warning];

    /// Returns the wire/storage encoding of this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::Warning => "Warning",
        }
    }

    /// Parses the wire/storage encoding.
    ///
    /// Returns `None` for anything outside the three known values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Success" => Some(Self::Success),
            "Failure" => Some(Self::Failure),
            "Warning" => Some(Self::Warning),
            _ => None,
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
