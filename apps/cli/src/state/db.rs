//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! The `Database` from `salesdesk-db` holds a `SqlitePool`, so commands can
//! share it without extra locking.

use salesdesk_db::Database;

/// Wrapper around `Database` handed to commands.
#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let rows = db_state.inner().reports().sales_rows(&filter).await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
