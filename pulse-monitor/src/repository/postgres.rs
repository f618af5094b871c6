//! Postgres Log Store
//!
//! Handles all database operations for interface log entries. The dynamic
//! WHERE clause is assembled from a [`QueryPlan`] with bound parameters;
//! the ORDER BY column comes from the plan's whitelisted sort field.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::domain::log::{InterfaceLog, LogStatus};
use pulse_core::query::{QueryPlan, SortDirection};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{LogStore, StatusCount, StoreError};

const SELECT_COLUMNS: &str =
    "SELECT id, interface_name, integration_key, status, message, created_at FROM interface_logs";

pub struct PgLogStore {
    pool: PgPool,
}

impl PgLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogStore for PgLogStore {
    async fn insert(&self, entry: &InterfaceLog) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO interface_logs (id, interface_name, integration_key, status, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.interface_name)
        .bind(&entry.integration_key)
        .bind(entry.status.as_str())
        .bind(&entry.message)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, plan: &QueryPlan) -> Result<Vec<InterfaceLog>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        push_filters(&mut builder, plan);

        builder.push(" ORDER BY ");
        builder.push(plan.sort.field.column());
        builder.push(match plan.sort.direction {
            SortDirection::Ascending => " ASC",
            SortDirection::Descending => " DESC",
        });

        builder.push(" LIMIT ");
        builder.push_bind(plan.limit);
        builder.push(" OFFSET ");
        builder.push_bind(plan.skip);

        let rows = builder
            .build_query_as::<LogRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn count(&self, plan: &QueryPlan) -> Result<i64, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM interface_logs");
        push_filters(&mut builder, plan);

        let row: (i64,) = builder.build_query_as().fetch_one(&self.pool).await?;

        Ok(row.0)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<InterfaceLog>, StoreError> {
        let row = sqlx::query_as::<_, LogRow>(
            r#"
            SELECT id, interface_name, integration_key, status, message, created_at
            FROM interface_logs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into()))
    }

    async fn count_by_status(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<StatusCount>, StoreError> {
        let rows = sqlx::query_as::<_, StatusCountRow>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM interface_logs
            WHERE created_at >= $1 AND created_at <= $2
            GROUP BY status
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, plan: &QueryPlan) {
    let mut prefix = " WHERE ";

    if let Some(status) = &plan.status {
        builder.push(prefix).push("status = ").push_bind(status.clone());
        prefix = " AND ";
    }

    if let Some(needle) = &plan.interface_contains {
        builder
            .push(prefix)
            .push("interface_name ILIKE ")
            .push_bind(format!("%{}%", escape_like(needle)));
        prefix = " AND ";
    }

    if let Some(key) = &plan.integration_key {
        builder
            .push(prefix)
            .push("integration_key = ")
            .push_bind(key.clone());
        prefix = " AND ";
    }

    if let Some((start, end)) = plan.range {
        builder.push(prefix).push("created_at >= ").push_bind(start);
        builder.push(" AND created_at <= ").push_bind(end);
    }
}

/// Escapes LIKE metacharacters so user input only ever matches literally.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn string_to_status(s: &str) -> LogStatus {
    LogStatus::parse(s).unwrap_or(LogStatus::Warning)
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct LogRow {
    id: Uuid,
    interface_name: String,
    integration_key: String,
    status: String,
    message: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<LogRow> for InterfaceLog {
    fn from(row: LogRow) -> Self {
        InterfaceLog {
            id: row.id,
            interface_name: row.interface_name,
            integration_key: row.integration_key,
            status: string_to_status(&row.status),
            message: row.message,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatusCountRow {
    status: String,
    count: i64,
}

impl From<StatusCountRow> for StatusCount {
    fn from(row: StatusCountRow) -> Self {
        StatusCount {
            status: row.status,
            count: row.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_neutralizes_metacharacters() {
        assert_eq!(escape_like("50%_done"), "50\\%\\_done");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_unknown_stored_status_decodes_to_warning() {
        assert_eq!(string_to_status("Success"), LogStatus::Success);
        assert_eq!(string_to_status("Degraded"), LogStatus::Warning);
    }
}
