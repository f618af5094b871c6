use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create interface_logs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interface_logs (
            id UUID PRIMARY KEY,
            interface_name VARCHAR(255) NOT NULL,
            integration_key VARCHAR(255) NOT NULL,
            status VARCHAR(20) NOT NULL,
            message TEXT,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // created_at backs the default sort, the date-range filter, and the
    // summary window scan
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_interface_logs_created_at ON interface_logs(created_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_interface_logs_status ON interface_logs(status)")
        .execute(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
