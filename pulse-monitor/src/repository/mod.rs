//! Repository Module
//!
//! Data access layer for the monitor. [`LogStore`] is the seam between the
//! services and a concrete backend: Postgres for durable deployments,
//! in-memory for ephemeral ones. Both interpret the same
//! [`QueryPlan`](pulse_core::query::QueryPlan), so filter semantics cannot
//! drift between them.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::domain::log::InterfaceLog;
use pulse_core::query::QueryPlan;
use uuid::Uuid;

/// Storage failure, split so callers can tell "store down" (retrievable)
/// from "operation rejected". An empty result is never an error.
#[derive(Debug)]
pub enum StoreError {
    /// The backend could not be reached (connection/pool-level failure).
    Unavailable(String),
    /// The backend rejected the operation.
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

/// Number of entries carrying one status value within a time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Append-mostly log storage.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Persists a fully-formed entry.
    async fn insert(&self, entry: &InterfaceLog) -> Result<(), StoreError>;

    /// Returns the page of entries selected by the plan, ordered per its
    /// sort specification.
    async fn find(&self, plan: &QueryPlan) -> Result<Vec<InterfaceLog>, StoreError>;

    /// Counts all entries matching the plan's predicate, ignoring its
    /// pagination window.
    async fn count(&self, plan: &QueryPlan) -> Result<i64, StoreError>;

    /// Looks up a single entry.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<InterfaceLog>, StoreError>;

    /// Groups entries created within `[from, to]` (inclusive) by status.
    /// Statuses with no entries are omitted.
    async fn count_by_status(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<StatusCount>, StoreError>;
}
