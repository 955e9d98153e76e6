//! # Repository Module
//!
//! Database repository implementations for SalesDesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Command                                                               │
//! │       │                                                                 │
//! │       │  db.reports().sales_rows(&filter)                              │
//! │       ▼                                                                 │
//! │  ReportRepository                                                      │
//! │  ├── sales_rows(&self, filter)                                         │
//! │  ├── inventory_rows(&self, filter)                                     │
//! │  └── payment_records(&self, filter)                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SaleEntryRepository`](sale_entry::SaleEntryRepository) - Encoded entries
//! - [`PaymentRepository`](payment::PaymentRepository) - Entry payments
//! - [`InventoryRepository`](inventory::InventoryRepository) - Released / to-follow stock
//! - [`ReportRepository`](report::ReportRepository) - Filtered report views
//! - [`CashCountRepository`](cash_count::CashCountRepository) - Daily cash counts
//! - [`FormSubmissionRepository`](form_submission::FormSubmissionRepository) - Printable forms

pub mod cash_count;
pub mod form_submission;
pub mod inventory;
pub mod payment;
pub mod report;
pub mod sale_entry;
