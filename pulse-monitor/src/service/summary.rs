//! Summary Service
//!
//! Status aggregation over a trailing time window.

use chrono::{DateTime, Duration, Utc};
use pulse_core::domain::log::LogStatus;
use pulse_core::dto::log::StatusSummary;

use crate::repository::{LogStore, StatusCount, StoreError};

/// Service error type
#[derive(Debug)]
pub enum SummaryError {
    StoreError(StoreError),
}

impl From<StoreError> for SummaryError {
    fn from(err: StoreError) -> Self {
        SummaryError::StoreError(err)
    }
}

pub type Result<T> = std::result::Result<T, SummaryError>;

/// Length of the default summary window, in hours
pub const DEFAULT_WINDOW_HOURS: i64 = 24;

/// Status counts over the trailing 24 hours
pub async fn status_summary(store: &dyn LogStore) -> Result<StatusSummary> {
    status_summary_window(store, Utc::now(), Duration::hours(DEFAULT_WINDOW_HOURS)).await
}

/// Status counts over an arbitrary trailing window ending at `window_end`
pub async fn status_summary_window(
    store: &dyn LogStore,
    window_end: DateTime<Utc>,
    window: Duration,
) -> Result<StatusSummary> {
    let rows = store.count_by_status(window_end - window, window_end).await?;

    Ok(fold_counts(rows))
}

/// Merges grouped counts into a summary.
///
/// [`StatusSummary`] carries a field per known status, so every status is
/// present at zero before any row is merged. Rows outside the known
/// statuses are ignored, never a crash.
fn fold_counts(rows: Vec<StatusCount>) -> StatusSummary {
    let mut summary = StatusSummary::default();

    for row in rows {
        match LogStatus::parse(&row.status) {
            Some(LogStatus::Success) => summary.success += row.count,
            Some(LogStatus::Failure) => summary.failure += row.count,
            Some(LogStatus::Warning) => summary.warning += row.count,
            None => {
                tracing::warn!("Ignoring unknown status in summary: {}", row.status);
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use pulse_core::domain::log::InterfaceLog;
    use uuid::Uuid;

    use super::*;
    use crate::repository::LogStore;
    use crate::repository::memory::MemoryLogStore;

    fn entry(status: LogStatus, created_at: DateTime<Utc>) -> InterfaceLog {
        InterfaceLog {
            id: Uuid::new_v4(),
            interface_name: "core-api".to_string(),
            integration_key: "core-01".to_string(),
            status,
            message: None,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_summary_counts_each_status_in_window() {
        let store = MemoryLogStore::new();
        let now = Utc::now();
        for status in LogStatus::ALL {
            store
                .insert(&entry(status, now - Duration::hours(1)))
                .await
                .unwrap();
        }

        let summary = status_summary(&store).await.unwrap();

        assert_eq!(
            summary,
            StatusSummary {
                success: 1,
                failure: 1,
                warning: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_summary_excludes_entries_outside_window() {
        let store = MemoryLogStore::new();
        let now = Utc::now();
        store
            .insert(&entry(LogStatus::Success, now - Duration::hours(1)))
            .await
            .unwrap();
        store
            .insert(&entry(LogStatus::Success, now - Duration::hours(25)))
            .await
            .unwrap();

        let summary = status_summary(&store).await.unwrap();

        assert_eq!(summary.success, 1);
    }

    #[tokio::test]
    async fn test_summary_reports_zero_for_absent_status() {
        let store = MemoryLogStore::new();
        let now = Utc::now();
        store
            .insert(&entry(LogStatus::Success, now - Duration::hours(1)))
            .await
            .unwrap();
        store
            .insert(&entry(LogStatus::Failure, now - Duration::hours(2)))
            .await
            .unwrap();

        let summary = status_summary(&store).await.unwrap();

        assert_eq!(summary.success, 1);
        assert_eq!(summary.failure, 1);
        assert_eq!(summary.warning, 0);
    }

    #[tokio::test]
    async fn test_custom_window_length() {
        let store = MemoryLogStore::new();
        let now = Utc::now();
        store
            .insert(&entry(LogStatus::Warning, now - Duration::hours(2)))
            .await
            .unwrap();

        let narrow = status_summary_window(&store, now, Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(narrow.warning, 0);

        let wide = status_summary_window(&store, now, Duration::hours(3))
            .await
            .unwrap();
        assert_eq!(wide.warning, 1);
    }

    #[test]
    fn test_fold_ignores_unknown_status_rows() {
        let rows = vec![
            StatusCount {
                status: "Success".to_string(),
                count: 2,
            },
            StatusCount {
                status: "Degraded".to_string(),
                count: 5,
            },
        ];

        let summary = fold_counts(rows);

        assert_eq!(summary.success, 2);
        assert_eq!(summary.failure, 0);
        assert_eq!(summary.warning, 0);
    }
}
