//! # Database Pool
//!
//! Opens the SalesDesk SQLite file and hands out repositories.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  one CLI command                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(DbConfig::new(path))                                     │
//! │       │   create file if missing, WAL, foreign keys, busy timeout       │
//! │       │   apply pending migrations                                      │
//! │       ▼                                                                 │
//! │  db.sale_entries() / db.reports() / db.cash_counts() / ...              │
//! │       │   each repository holds a clone of the pool handle              │
//! │       ▼                                                                 │
//! │  db.close()   checkpoint and release the file before exit               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A save writes an entry then its payments and inventory one after another,
//! and a report runs its queries in sequence, so a handful of connections is
//! plenty. The busy timeout covers the seed binary or a second terminal
//! writing to the same file.

use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::migrations;
use crate::repository::cash_count::CashCountRepository;
use crate::repository::form_submission::FormSubmissionRepository;
use crate::repository::inventory::InventoryRepository;
use crate::repository::payment::PaymentRepository;
use crate::repository::report::ReportRepository;
use crate::repository::sale_entry::SaleEntryRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives and how the pool treats it.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file; ignored for in-memory databases.
    pub database_path: PathBuf,

    /// Default: 4
    pub max_connections: u32,

    /// How long a write waits on another writer's lock. Default: 5 seconds
    pub busy_timeout: Duration,

    in_memory: bool,
}

impl DbConfig {
    /// File-backed database, created on first use.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::new("./salesdesk.db")).await?;
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
            in_memory: false,
        }
    }

    /// Private empty database for tests.
    ///
    /// Every call is a separate database. It lives on a single connection
    /// that is never recycled, since dropping it would drop the data.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            busy_timeout: Duration::from_secs(5),
            in_memory: true,
        }
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        let options = if self.in_memory {
            SqliteConnectOptions::new().in_memory(true)
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        // cascading deletes and the FK on payments rely on this
        options.foreign_keys(true).busy_timeout(self.busy_timeout)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Database handle giving access to the repositories.
///
/// ## Usage in Commands
/// ```rust,ignore
/// async fn sales_report(db: &DbState, filter: &ReportFilter) -> Result<SalesReportResponse, ApiError> {
///     let rows = db.inner().reports().sales_rows(filter).await?;
///     Ok(summarize_package_sales(&rows).into())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and applies pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            max_connections = config.max_connections,
            "Opening database"
        );

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.busy_timeout);
        if config.in_memory {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(config.connect_options()).await?;
        debug!("Database pool created");

        migrations::run_migrations(&pool).await?;

        Ok(Database { pool })
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the sale entry repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let entry = db.sale_entries().insert(&submission.entry).await?;
    /// ```
    pub fn sale_entries(&self) -> SaleEntryRepository {
        SaleEntryRepository::new(self.pool.clone())
    }

    pub fn payments(&self) -> PaymentRepository {
        PaymentRepository::new(self.pool.clone())
    }

    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.pool.clone())
    }

    pub fn cash_counts(&self) -> CashCountRepository {
        CashCountRepository::new(self.pool.clone())
    }

    pub fn form_submissions(&self) -> FormSubmissionRepository {
        FormSubmissionRepository::new(self.pool.clone())
    }

    /// Waits for in-flight queries and closes every connection.
    ///
    /// Later repository calls fail with [`DbError::Connection`](crate::DbError::Connection).
    pub async fn close(&self) {
        debug!("Closing database pool");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let first = Database::new(DbConfig::in_memory()).await.unwrap();
        let second = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO reference_counters (form_type, last_value) VALUES ('ER', 1)")
            .execute(first.pool())
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reference_counters")
            .fetch_one(second.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_closed_database_reports_connection_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let result = db.sale_entries().count().await;
        assert!(matches!(result, Err(DbError::Connection(_))));
    }

    #[test]
    fn test_file_config_defaults() {
        let config = DbConfig::new("/tmp/salesdesk.db");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
        assert!(!config.in_memory);
        assert!(DbConfig::in_memory().in_memory);
    }
}
