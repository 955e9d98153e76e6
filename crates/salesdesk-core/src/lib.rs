//! # salesdesk-core: Pure Business Logic for SalesDesk
//!
//! Everything the encoder and the reports compute, as pure functions with no
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SalesDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    CLI (salesdesk)                              │   │
//! │  │    encode ──► report sales/inventory/payments ──► cash ──► forms│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Commands                                     │   │
//! │  │    save_entry, sales_report, save_cash_count, etc.              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ salesdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │ pricing │ │ payment │ │ report  │ │  cash   │  │   │
//! │  │   │  Money  │ │ Package │ │Category │ │ Summary │ │  Lines  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐             │   │
//! │  │   │ encoder │ │ package │ │  forms  │ │validation│             │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘             │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 salesdesk-db (Database Layer)                   │   │
//! │  │        SQLite tables, report views, migrations, repositories    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in integer centavos, parsing and peso formatting
//! - [`pricing`] - Package catalogue and discount arithmetic
//! - [`payment`] - Payment mode categorisation
//! - [`package`] - Package label bucketing for report columns
//! - [`report`] - Sales, payment and inventory report aggregation
//! - [`cash`] - Daily cash count and reconciliation
//! - [`encoder`] - Encoder form state and submission rules
//! - [`forms`] - Printable form types and reference numbers
//! - [`types`] - Stored record types
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use salesdesk_core::encoder::{EncoderForm, FormField};
//! use salesdesk_core::money::Money;
//!
//! let mut form = EncoderForm::new();
//! form.update(FormField::PackageType, "Silver (1 bottle)");
//! form.update(FormField::Quantity, "2");
//! form.update(FormField::Discount, "10");
//!
//! assert_eq!(form.pricing().total_sales, Money::from_pesos(6_300));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cash;
pub mod encoder;
pub mod error;
pub mod forms;
pub mod money;
pub mod package;
pub mod payment;
pub mod pricing;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
