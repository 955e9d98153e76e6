//! # Database Error Types
//!
//! ## Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sqlx::Error                                                            │
//! │     ├── Database, kind = UniqueViolation ──► UniqueViolation { columns }│
//! │     ├── Database, kind = ForeignKey      ──► ForeignKeyViolation        │
//! │     ├── Database, kind = CheckViolation  ──► CheckViolation {field,rule}│
//! │     │        (ck_* name looked up in CHECK_RULES)                       │
//! │     ├── Database, anything else          ──► Query                      │
//! │     ├── PoolTimedOut / PoolClosed / Io   ──► Connection                 │
//! │     ├── RowNotFound                      ──► NotFound                   │
//! │     └── anything else                    ──► Query                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI turns `CheckViolation` into a validation error naming the field,
//! so a row the core validation let through still gets a readable message.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Named CHECK constraints in the schema: `(constraint, field, rule)`.
const CHECK_RULES: &[(&str, &str, &str)] = &[
    ("ck_discount_range", "discount_percent", "must be between 0 and 100"),
    ("ck_counts_non_negative", "quantity", "must not be negative"),
    ("ck_inventory_non_negative", "inventory counts", "must not be negative"),
    ("ck_payment_slot", "payment_no", "must be 1 or 2"),
    ("ck_pieces_non_negative", "pieces", "must not be negative"),
    ("ck_form_type", "form_type", "must be ER, SC or PI"),
];

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A UNIQUE constraint failed, e.g. a reused form reference number.
    #[error("Duplicate value for {columns}")]
    UniqueViolation { columns: String },

    /// Payment, inventory or print log row for a parent that doesn't exist.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// A named CHECK constraint rejected the row.
    #[error("{field} {rule}")]
    CheckViolation { field: String, rule: String },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    /// Stored JSON could not be encoded or decoded.
    #[error("Invalid stored payload: {0}")]
    InvalidPayload(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Maps SQLite's `CHECK constraint failed: <name>` onto the rule it
    /// enforces. Unnamed or unknown constraints keep SQLite's wording.
    fn check_violation(message: &str) -> Self {
        let name = message
            .rsplit_once(": ")
            .map_or(message, |(_, name)| name)
            .trim();

        match CHECK_RULES.iter().find(|(constraint, _, _)| *constraint == name) {
            Some((_, field, rule)) => DbError::CheckViolation {
                field: (*field).to_string(),
                rule: (*rule).to_string(),
            },
            None => DbError::CheckViolation {
                field: name.to_string(),
                rule: "failed a check".to_string(),
            },
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message();
                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation {
                        // "UNIQUE constraint failed: form_submissions.reference_no"
                        columns: message
                            .split_once(": ")
                            .map_or(message, |(_, columns)| columns)
                            .to_string(),
                    },
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation {
                        message: message.to_string(),
                    },
                    ErrorKind::CheckViolation => DbError::check_violation(message),
                    _ => DbError::Query(message.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => {
                DbError::Connection("timed out waiting for a connection".to_string())
            }
            sqlx::Error::PoolClosed => DbError::Connection("database is closed".to_string()),
            sqlx::Error::Io(_) | sqlx::Error::Configuration(_) => {
                DbError::Connection(err.to_string())
            }

            _ => DbError::Query(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::InvalidPayload(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
