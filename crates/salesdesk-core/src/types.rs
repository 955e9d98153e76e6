//! # Domain Types
//!
//! Record types mirrored from the sales tables and report views.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │   SaleEntry     │   │  SalePayment    │   │  InventoryMovement   │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  id (UUID)      │◄──│  sale_entry_id  │   │  sale_entry_id (FK)  │  │
//! │  │  member_name    │   │  payment_no 1|2 │   │  released_bottle     │  │
//! │  │  package_type   │   │  mode/mode_type │   │  to_follow_blister   │  │
//! │  │  total_sales    │   │  amount         │   │  ...                 │  │
//! │  └─────────────────┘   └─────────────────┘   └──────────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ DailyCashCount  │   │ SalesReportRow  │  (view rows)                │
//! │  │  cash_date      │   │ InventoryReport │                             │
//! │  │  lines[]        │   │   Record        │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Money columns are stored as integer centavos (`*_centavos`) and exposed as
//! [`Money`] through accessors.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Sale Entry
// =============================================================================

/// One recorded transaction line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleEntry {
    pub id: String,
    pub location: String,
    pub sale_date: Option<NaiveDate>,
    pub po_number: Option<String>,
    pub member_name: Option<String>,
    pub username: Option<String>,
    pub is_new_member: bool,
    pub member_type: Option<String>,
    pub package_type: Option<String>,
    pub to_blister: bool,
    pub quantity: i64,
    pub blister_count: i64,
    pub original_price_centavos: i64,
    /// Basis points, 0-10000 (750 = 7.5%).
    pub discount_bps: i64,
    pub price_after_discount_centavos: i64,
    pub one_time_discount_centavos: i64,
    pub total_sales_centavos: i64,
    pub remarks: Option<String>,
    pub received_by: Option<String>,
    pub collected_by: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SaleEntry {
    #[inline]
    pub fn original_price(&self) -> Money {
        Money::from_centavos(self.original_price_centavos)
    }

    #[inline]
    pub fn total_sales(&self) -> Money {
        Money::from_centavos(self.total_sales_centavos)
    }
}

/// A sale entry that has not been stored yet.
///
/// Produced by the encoder; the repository assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSaleEntry {
    pub location: String,
    pub sale_date: Option<NaiveDate>,
    pub po_number: Option<String>,
    pub member_name: Option<String>,
    pub username: Option<String>,
    pub is_new_member: bool,
    pub member_type: Option<String>,
    pub package_type: Option<String>,
    pub to_blister: bool,
    pub quantity: i64,
    pub blister_count: i64,
    pub original_price: Money,
    pub discount_bps: i64,
    pub price_after_discount: Money,
    pub one_time_discount: Money,
    pub total_sales: Money,
    pub remarks: Option<String>,
    pub received_by: Option<String>,
    pub collected_by: Option<String>,
    pub created_by: Option<String>,
}

// =============================================================================
// Payment
// =============================================================================

/// A payment towards a sale entry. An entry carries at most two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SalePayment {
    pub id: String,
    pub sale_entry_id: String,
    pub payment_no: i64,
    pub mode: Option<String>,
    pub mode_type: Option<String>,
    pub reference_no: Option<String>,
    pub amount_centavos: i64,
    pub created_at: DateTime<Utc>,
}

impl SalePayment {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_centavos(self.amount_centavos)
    }
}

/// Payment row built by the encoder, not yet attached to a stored entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub payment_no: i64,
    pub mode: Option<String>,
    pub mode_type: Option<String>,
    pub reference_no: Option<String>,
    pub amount: Money,
}

/// Payment as read for reporting: mode text plus amount, filtered by entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PaymentRecord {
    pub sale_entry_id: String,
    pub mode: Option<String>,
    pub mode_type: Option<String>,
    pub amount_centavos: i64,
}

impl PaymentRecord {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_centavos(self.amount_centavos)
    }
}

// =============================================================================
// Inventory Movement
// =============================================================================

/// Released and to-follow stock for a sale entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryMovement {
    pub id: String,
    pub sale_entry_id: String,
    pub released_bottle: i64,
    pub released_blister: i64,
    pub to_follow_bottle: i64,
    pub to_follow_blister: i64,
    pub created_at: DateTime<Utc>,
}

/// Movement counts built by the encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventoryMovement {
    pub released_bottle: i64,
    pub released_blister: i64,
    pub to_follow_bottle: i64,
    pub to_follow_blister: i64,
}

impl NewInventoryMovement {
    /// True when at least one count is positive; all-zero movements are not
    /// stored.
    pub fn has_data(&self) -> bool {
        self.released_bottle > 0
            || self.released_blister > 0
            || self.to_follow_bottle > 0
            || self.to_follow_blister > 0
    }
}

// =============================================================================
// Report View Rows
// =============================================================================

/// Row of the `v_sales_report` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SalesReportRow {
    pub sale_entry_id: String,
    pub sale_date: Option<NaiveDate>,
    pub member_name: Option<String>,
    pub po_number: Option<String>,
    pub username: Option<String>,
    pub package_type: Option<String>,
    pub quantity: i64,
    pub total_sales_centavos: i64,
    pub created_at: DateTime<Utc>,
}

impl SalesReportRow {
    #[inline]
    pub fn total_sales(&self) -> Money {
        Money::from_centavos(self.total_sales_centavos)
    }
}

/// Row of the `v_inventory_report` view: an entry joined with its movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryReportRecord {
    pub sale_entry_id: String,
    pub sale_date: Option<NaiveDate>,
    pub member_name: Option<String>,
    pub po_number: Option<String>,
    pub username: Option<String>,
    pub package_type: Option<String>,
    pub quantity: i64,
    pub blister_count: i64,
    pub released_bottle: i64,
    pub released_blister: i64,
    pub to_follow_bottle: i64,
    pub to_follow_blister: i64,
    pub total_sales_centavos: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Daily Cash Count
// =============================================================================

/// Header of a daily cash count. One per (cash_date, created_by).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DailyCashCountHeader {
    pub id: String,
    pub cash_date: NaiveDate,
    pub created_by: String,
    pub total_cash_centavos: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyCashCountHeader {
    #[inline]
    pub fn total_cash(&self) -> Money {
        Money::from_centavos(self.total_cash_centavos)
    }
}

/// One denomination line of a cash count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DailyCashCountLine {
    pub id: String,
    pub denomination_centavos: i64,
    pub pieces: i64,
    pub amount_centavos: i64,
}

/// A saved cash count with its lines (denomination descending).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCashCount {
    pub header: DailyCashCountHeader,
    pub lines: Vec<DailyCashCountLine>,
}

// =============================================================================
// Printable Forms
// =============================================================================

/// A stored printable form with its allocated reference number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FormSubmission {
    pub id: String,
    pub form_type: String,
    pub reference_no: String,
    /// JSON text of the form fields.
    pub payload: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Audit row written each time a form is printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PrintLog {
    pub id: String,
    pub submission_id: String,
    pub form_type: String,
    pub reference_no: String,
    pub printed_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
