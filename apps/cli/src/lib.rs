//! # SalesDesk CLI
//!
//! Command layer of the `salesdesk` binary: state, commands and output.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Load .env ────────────────────────────────────────────────────────► │
//! │     • dotenvy, missing file is fine                                     │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,salesdesk=debug,sqlx=warn; override with RUST_LOG   │
//! │                                                                         │
//! │  3. Load ConfigState ─────────────────────────────────────────────────► │
//! │     • SALESDESK_* variables over defaults                               │
//! │                                                                         │
//! │  4. Determine Database Path (only for commands that need it) ─────────► │
//! │     • SALESDESK_DB_PATH, or                                             │
//! │     • Linux: ~/.local/share/salesdesk/salesdesk.db                      │
//! │     • macOS: ~/Library/Application Support/com.salesdesk.salesdesk/     │
//! │                                                                         │
//! │  5. Connect to Database ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │                                                                         │
//! │  6. Dispatch the command, print a table or JSON                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use salesdesk_db::{Database, DbConfig};
use state::{ConfigState, DbState};

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "salesdesk.db";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=salesdesk_db=trace` - Trace the storage crate only
/// - Default: INFO, DEBUG for salesdesk crates
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,salesdesk=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// `ConfigState::database_path` wins; otherwise the platform data directory
/// is used and created if missing.
pub fn get_database_path(config: &ConfigState) -> Result<PathBuf, ApiError> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "salesdesk", "salesdesk")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir).map_err(|e| {
        ApiError::internal(format!(
            "Could not create data directory {}: {}",
            data_dir.display(),
            e
        ))
    })?;

    Ok(data_dir.join(DATABASE_FILE))
}

/// Connects to the configured database and applies migrations.
pub async fn open_database(config: &ConfigState) -> Result<DbState, ApiError> {
    let db_path = get_database_path(config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    Ok(DbState::new(db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_override() {
        let config = ConfigState {
            database_path: Some(PathBuf::from("/tmp/override.db")),
            ..ConfigState::default()
        };
        assert_eq!(get_database_path(&config).unwrap(), PathBuf::from("/tmp/override.db"));
    }
}
