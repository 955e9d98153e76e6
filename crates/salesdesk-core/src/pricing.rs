//! # Pricing
//!
//! Package catalogue and the derived price fields of a sale entry.
//!
//! ## Derivation Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  package type ──► unit price (fixed table)                              │
//! │                        │                                                │
//! │       quantity ────────┤  (blister count for the Blister package)       │
//! │                        ▼                                                │
//! │                 original price = max(0, unit × count)                   │
//! │                        │                                                │
//! │    discount % ─────────┤                                                │
//! │                        ▼                                                │
//! │           discounted = max(0, original × (1 − pct/100))                 │
//! │                        │                                                │
//! │ one-time discount ─────┤                                                │
//! │                        ▼                                                │
//! │       price after discount = max(0, discounted − one-time)             │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                  total sales (same value)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::MAX_COUNT;

// =============================================================================
// Package Catalogue
// =============================================================================

/// A predefined product bundle with a fixed unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    Silver,
    Gold,
    Platinum,
    Retail,
    Blister,
}

impl PackageType {
    /// All packages, in the order the encoder lists them.
    pub const ALL: [PackageType; 5] = [
        PackageType::Silver,
        PackageType::Gold,
        PackageType::Platinum,
        PackageType::Retail,
        PackageType::Blister,
    ];

    /// The label stored in `sales_entries.package_type`.
    pub const fn label(&self) -> &'static str {
        match self {
            PackageType::Silver => "Silver (1 bottle)",
            PackageType::Gold => "Gold (3 bottles)",
            PackageType::Platinum => "Platinum (10 bottles)",
            PackageType::Retail => "Retail (1 bottle)",
            PackageType::Blister => "Blister (1 blister pack)",
        }
    }

    /// Unit price of one package.
    pub const fn unit_price(&self) -> Money {
        match self {
            PackageType::Silver => Money::from_pesos(3_500),
            PackageType::Gold => Money::from_pesos(10_500),
            PackageType::Platinum => Money::from_pesos(35_000),
            PackageType::Retail => Money::from_pesos(2_280),
            PackageType::Blister => Money::from_pesos(779),
        }
    }

    /// Bottles contained in one package (0 for a blister pack).
    pub const fn bottles(&self) -> i64 {
        match self {
            PackageType::Silver | PackageType::Retail => 1,
            PackageType::Gold => 3,
            PackageType::Platinum => 10,
            PackageType::Blister => 0,
        }
    }

    /// Blister packs are priced per blister count, everything else per
    /// quantity.
    pub const fn priced_by_blister_count(&self) -> bool {
        matches!(self, PackageType::Blister)
    }

    /// Exact label lookup, as the price table does it.
    pub fn from_label(label: &str) -> Option<PackageType> {
        PackageType::ALL.into_iter().find(|p| p.label() == label)
    }
}

/// Unit price for a stored package label; unknown or empty labels price at
/// zero.
pub fn unit_price_for(label: &str) -> Money {
    PackageType::from_label(label)
        .map(|p| p.unit_price())
        .unwrap_or_default()
}

/// Computes the original (pre-discount) price of an entry.
///
/// Fails with `OutOfRange` when the count is too large to price.
///
/// ## Example
/// ```rust
/// use salesdesk_core::money::Money;
/// use salesdesk_core::pricing::compute_original_price;
///
/// assert_eq!(compute_original_price("Gold (3 bottles)", 2, 0).unwrap(), Money::from_pesos(21_000));
/// // Blister packs multiply by blister count, not quantity
/// assert_eq!(compute_original_price("Blister (1 blister pack)", 9, 3).unwrap(), Money::from_pesos(2_337));
/// assert_eq!(compute_original_price("Mystery box", 5, 0).unwrap(), Money::zero());
/// ```
pub fn compute_original_price(
    package_label: &str,
    quantity: i64,
    blister_count: i64,
) -> Result<Money, ValidationError> {
    let Some(package) = PackageType::from_label(package_label) else {
        return Ok(Money::zero());
    };

    let (field, count) = if package.priced_by_blister_count() {
        ("blister_count", blister_count)
    } else {
        ("quantity", quantity)
    };

    package
        .unit_price()
        .multiply_quantity(count)
        .map(|price| price.clamp_non_negative())
        .ok_or_else(|| ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_COUNT,
        })
}

// =============================================================================
// Discounts
// =============================================================================

/// Discount percentages offered by the encoder's dropdown.
pub const DISCOUNT_OPTIONS: [i64; 5] = [0, 5, 10, 15, 20];

/// 100% in basis points.
pub const MAX_DISCOUNT_BPS: i64 = 10_000;

/// Reads a discount typed as a percentage into basis points.
///
/// Two decimals of a percent are kept and finer digits round half-up.
/// Unparseable text reads as zero.
///
/// ## Example
/// ```rust
/// use salesdesk_core::pricing::parse_discount_bps;
///
/// assert_eq!(parse_discount_bps("10"), 1_000);
/// assert_eq!(parse_discount_bps("7.5"), 750);
/// assert_eq!(parse_discount_bps("12.345"), 1_235);
/// assert_eq!(parse_discount_bps("ten"), 0);
/// ```
pub fn parse_discount_bps(text: &str) -> i64 {
    // hundredths of a percent parse exactly like centavos of a peso
    Money::parse(text).map_or(0, |m| m.centavos())
}

/// Renders basis points as a percentage without trailing zeros: `7.5%`.
pub fn format_percent(bps: i64) -> String {
    let sign = if bps < 0 { "-" } else { "" };
    let whole = (bps / 100).unsigned_abs();
    let fraction = (bps % 100).unsigned_abs();
    match fraction {
        0 => format!("{sign}{whole}%"),
        f if f % 10 == 0 => format!("{sign}{whole}.{}%", f / 10),
        f => format!("{sign}{whole}.{f:02}%"),
    }
}

// =============================================================================
// Derived Pricing
// =============================================================================

/// The derived price fields shown read-only on the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub original_price: Money,
    /// As entered; out-of-range values price as clamped into 0-100%.
    pub discount_bps: i64,
    pub one_time_discount: Money,
    pub price_after_discount: Money,
    pub total_sales: Money,
}

/// Applies the percentage discount then the one-time discount.
///
/// ## Example
/// ```rust
/// use salesdesk_core::money::Money;
/// use salesdesk_core::pricing::compute_pricing;
///
/// let summary = compute_pricing(Money::from_pesos(10_500), 1_000, Money::from_pesos(450));
/// assert_eq!(summary.price_after_discount, Money::from_pesos(9_000));
/// assert_eq!(summary.total_sales, summary.price_after_discount);
/// ```
pub fn compute_pricing(
    original_price: Money,
    discount_bps: i64,
    one_time_discount: Money,
) -> PricingSummary {
    let discounted = original_price
        .apply_percentage_discount(discount_bps.clamp(0, MAX_DISCOUNT_BPS) as u32)
        .clamp_non_negative();
    let price_after_discount = (discounted - one_time_discount).clamp_non_negative();

    PricingSummary {
        original_price,
        discount_bps,
        one_time_discount,
        price_after_discount,
        total_sales: price_after_discount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
