//! # Migrations
//!
//! SQL files under `migrations/sqlite/` are embedded at compile time and
//! applied in filename order by [`Database::new`](crate::Database::new).
//!
//! New schema goes in a new `NNN_description.sql`; applied files are never
//! edited because sqlx checks their checksums. Views must be dropped and
//! recreated to change, since `CREATE VIEW IF NOT EXISTS` keeps the old
//! definition.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies pending migrations; already applied ones are skipped.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!(migrations = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn schema_objects(pool: &SqlitePool, kind: &str) -> Vec<String> {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = ?1 AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY name",
        )
        .bind(kind)
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(applied as usize, MIGRATOR.migrations.len());

        let views = schema_objects(&pool, "view").await;
        assert_eq!(views, vec!["v_inventory_report", "v_sales_report"]);

        let tables = schema_objects(&pool, "table").await;
        for table in [
            "daily_cash_count_lines",
            "daily_cash_counts",
            "form_submissions",
            "print_logs",
            "reference_counters",
            "sales_entries",
            "sales_entry_inventory",
            "sales_entry_payments",
        ] {
            assert!(tables.iter().any(|t| t == table), "missing table {table}");
        }
    }
}
