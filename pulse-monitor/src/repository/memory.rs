//! In-memory Log Store
//!
//! Applies the query plan directly to a vector behind an async RwLock.
//! Used for ephemeral deployments (`STORE_BACKEND=memory`) and as the
//! substrate for the service-level tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::domain::log::{InterfaceLog, LogStatus};
use pulse_core::query::QueryPlan;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{LogStore, StatusCount, StoreError};

#[derive(Default)]
pub struct MemoryLogStore {
    entries: RwLock<Vec<InterfaceLog>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn insert(&self, entry: &InterfaceLog) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.push(entry.clone());
        Ok(())
    }

    async fn find(&self, plan: &QueryPlan) -> Result<Vec<InterfaceLog>, StoreError> {
        let entries = self.entries.read().await;

        let mut selected: Vec<InterfaceLog> = entries
            .iter()
            .filter(|entry| plan.matches(entry))
            .cloned()
            .collect();
        selected.sort_by(|a, b| plan.compare(a, b));

        Ok(selected
            .into_iter()
            .skip(plan.skip as usize)
            .take(plan.limit as usize)
            .collect())
    }

    async fn count(&self, plan: &QueryPlan) -> Result<i64, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().filter(|entry| plan.matches(entry)).count() as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<InterfaceLog>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|entry| entry.id == id).cloned())
    }

    async fn count_by_status(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<StatusCount>, StoreError> {
        let entries = self.entries.read().await;

        let mut counts = [0i64; 3];
        for entry in entries.iter() {
            if entry.created_at < from || entry.created_at > to {
                continue;
            }
            match entry.status {
                LogStatus::Success => counts[0] += 1,
                LogStatus::Failure => counts[1] += 1,
                LogStatus::Warning => counts[2] += 1,
            }
        }

        Ok(LogStatus::ALL
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(status, count)| StatusCount {
                status: status.as_str().to_string(),
                count,
            })
            .collect())
    }
}
