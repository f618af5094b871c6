//! Log Service
//!
//! Business logic for interface log entries: the list/count orchestration
//! behind the dashboard table, and validated ingestion with its
//! failure-alert side effect.

use chrono::Utc;
use pulse_core::domain::log::{InterfaceLog, LogStatus};
use pulse_core::dto::log::{CreateLog, LogPage, LogQuery};
use pulse_core::query::QueryPlan;
use uuid::Uuid;

use crate::notify::Notifier;
use crate::repository::{LogStore, StoreError};

/// Service error type
#[derive(Debug)]
pub enum LogError {
    NotFound(Uuid),
    ValidationError(String),
    StoreError(StoreError),
}

impl From<StoreError> for LogError {
    fn from(err: StoreError) -> Self {
        LogError::StoreError(err)
    }
}

pub type Result<T> = std::result::Result<T, LogError>;

/// List log entries matching the filter, with the pagination envelope
pub async fn list_logs(store: &dyn LogStore, query: &LogQuery) -> Result<LogPage> {
    let plan = QueryPlan::from_query(query);

    let logs = store.find(&plan).await?;
    let count = store.count(&plan).await?;

    // ceil(count / limit); zero matches means zero pages
    let total_pages = (count + plan.limit - 1) / plan.limit;

    Ok(LogPage {
        logs,
        total_pages,
        // Echoed as requested, never clamped: a page past the end comes
        // back with an empty list
        current_page: plan.page,
    })
}

/// Get a single entry by ID
pub async fn get_log(store: &dyn LogStore, id: Uuid) -> Result<InterfaceLog> {
    let entry = store.find_by_id(id).await?.ok_or(LogError::NotFound(id))?;

    Ok(entry)
}

/// Validate and persist a new entry, then queue a failure alert if needed
pub async fn create_log(
    store: &dyn LogStore,
    notifier: &Notifier,
    req: CreateLog,
) -> Result<InterfaceLog> {
    // Validate before any side effect
    let status = validate_create(&req)?;

    let entry = InterfaceLog {
        id: Uuid::new_v4(),
        interface_name: req.interface_name,
        integration_key: req.integration_key,
        status,
        message: req.message,
        created_at: req.created_at.unwrap_or_else(Utc::now),
    };

    store.insert(&entry).await?;

    tracing::info!("Log entry created: {} ({})", entry.interface_name, entry.id);

    // Alert handoff is decoupled from ingestion: enqueueing cannot fail
    // the request, and delivery failures stay inside the notifier
    if entry.status == LogStatus::Failure {
        notifier.dispatch(&entry);
    }

    Ok(entry)
}

// =============================================================================
// Validation
// =============================================================================

fn validate_create(req: &CreateLog) -> Result<LogStatus> {
    const MAX_NAME_LENGTH: usize = 255;

    if req.interface_name.trim().is_empty() {
        return Err(LogError::ValidationError(
            "interfaceName is required".to_string(),
        ));
    }

    if req.interface_name.len() > MAX_NAME_LENGTH {
        return Err(LogError::ValidationError(format!(
            "interfaceName is too long (max: {} chars)",
            MAX_NAME_LENGTH
        )));
    }

    if req.integration_key.trim().is_empty() {
        return Err(LogError::ValidationError(
            "integrationKey is required".to_string(),
        ));
    }

    if req.integration_key.len() > MAX_NAME_LENGTH {
        return Err(LogError::ValidationError(format!(
            "integrationKey is too long (max: {} chars)",
            MAX_NAME_LENGTH
        )));
    }

    LogStatus::parse(&req.status).ok_or_else(|| {
        LogError::ValidationError(format!(
            "status must be one of Success, Failure or Warning (got '{}')",
            req.status
        ))
    })
}
