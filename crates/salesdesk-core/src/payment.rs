//! # Payment Categorisation
//!
//! Buckets the free-text (mode, mode type) pair of a payment into one of
//! twelve fixed report categories.
//!
//! ## Matching Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  normalise both fields: lowercase, keep [a-z0-9] only                   │
//! │       │                                                                 │
//! │       ├── provider names win first ─► gcash │ maya/paymaya │ bdo │ bpi  │
//! │       ├── cheque / check                                                │
//! │       ├── voucher / gift certificate                                    │
//! │       ├── credit card / debit card / card                               │
//! │       ├── bank / transfer / deposit  ─► Other Bank Transfer             │
//! │       ├── wallet                     ─► Other E-Wallet                  │
//! │       ├── cash                                                          │
//! │       └── anything else (or blank)   ─► Unassigned                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "E-Wallet / GCash" therefore lands in GCash, and "Bank Transfer / BDO" in
//! BDO, while a bare "Bank Transfer" goes to Other Bank Transfer.

use serde::{Deserialize, Serialize};

/// Fixed payment categories, declared in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    Cash,
    GCash,
    Maya,
    Bdo,
    Bpi,
    OtherBankTransfer,
    OtherEWallet,
    Cheque,
    CreditCard,
    DebitCard,
    Voucher,
    Unassigned,
}

impl PaymentCategory {
    /// Every category in report order.
    pub const ALL: [PaymentCategory; 12] = [
        PaymentCategory::Cash,
        PaymentCategory::GCash,
        PaymentCategory::Maya,
        PaymentCategory::Bdo,
        PaymentCategory::Bpi,
        PaymentCategory::OtherBankTransfer,
        PaymentCategory::OtherEWallet,
        PaymentCategory::Cheque,
        PaymentCategory::CreditCard,
        PaymentCategory::DebitCard,
        PaymentCategory::Voucher,
        PaymentCategory::Unassigned,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            PaymentCategory::Cash => "Cash",
            PaymentCategory::GCash => "GCash",
            PaymentCategory::Maya => "Maya",
            PaymentCategory::Bdo => "BDO",
            PaymentCategory::Bpi => "BPI",
            PaymentCategory::OtherBankTransfer => "Other Bank Transfer",
            PaymentCategory::OtherEWallet => "Other E-Wallet",
            PaymentCategory::Cheque => "Cheque",
            PaymentCategory::CreditCard => "Credit Card",
            PaymentCategory::DebitCard => "Debit Card",
            PaymentCategory::Voucher => "Voucher",
            PaymentCategory::Unassigned => "Unassigned",
        }
    }

    /// Whether the category counts as physical cash for reconciliation.
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentCategory::Cash)
    }
}

fn normalize(value: Option<&str>) -> String {
    value
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Categorises one payment.
///
/// ## Example
/// ```rust
/// use salesdesk_core::payment::{categorize_payment, PaymentCategory};
///
/// assert_eq!(categorize_payment(Some("e-wallet"), Some("gcash")), PaymentCategory::GCash);
/// assert_eq!(categorize_payment(Some("Bank Transfer"), None), PaymentCategory::OtherBankTransfer);
/// assert_eq!(categorize_payment(Some("CASH"), None), PaymentCategory::Cash);
/// assert_eq!(categorize_payment(None, None), PaymentCategory::Unassigned);
/// ```
pub fn categorize_payment(mode: Option<&str>, mode_type: Option<&str>) -> PaymentCategory {
    let mode = normalize(mode);
    let mode_type = normalize(mode_type);
    let either = |needle: &str| mode.contains(needle) || mode_type.contains(needle);

    if either("gcash") {
        return PaymentCategory::GCash;
    }
    if either("maya") {
        return PaymentCategory::Maya;
    }
    if either("bdo") {
        return PaymentCategory::Bdo;
    }
    if either("bpi") {
        return PaymentCategory::Bpi;
    }
    if either("cheque") || either("check") {
        return PaymentCategory::Cheque;
    }
    if either("voucher") || either("giftcertificate") {
        return PaymentCategory::Voucher;
    }
    if either("debit") {
        return PaymentCategory::DebitCard;
    }
    if either("credit") || either("card") {
        return PaymentCategory::CreditCard;
    }
    if either("bank") || either("transfer") || either("deposit") {
        return PaymentCategory::OtherBankTransfer;
    }
    if either("wallet") {
        return PaymentCategory::OtherEWallet;
    }
    if either("cash") {
        return PaymentCategory::Cash;
    }

    PaymentCategory::Unassigned
}

// =============================================================================
// Encoder Options
// =============================================================================

/// A value/label pair offered by an encoder dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Modes of payment offered by the encoder.
pub const PAYMENT_MODE_OPTIONS: [SelectOption; 4] = [
    SelectOption { value: "cash", label: "Cash" },
    SelectOption { value: "bank-transfer", label: "Bank Transfer" },
    SelectOption { value: "e-wallet", label: "E-Wallet" },
    SelectOption { value: "cheque", label: "Cheque" },
];

/// Payment mode types (provider) offered by the encoder.
pub const PAYMENT_TYPE_OPTIONS: [SelectOption; 4] = [
    SelectOption { value: "maya", label: "Maya" },
    SelectOption { value: "gcash", label: "GCash" },
    SelectOption { value: "bdo", label: "BDO" },
    SelectOption { value: "bpi", label: "BPI" },
];

// =============================================================================
// Unit Tests
// =============================================================================
