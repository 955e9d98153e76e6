//! # Daily Cash Count
//!
//! Denomination arithmetic for the end-of-day cash count and the
//! cash-on-hand reconciliation against recorded cash payments.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  (denomination, pieces)[]                                               │
//! │        │  normalize_lines: known denomination, no duplicates,          │
//! │        │                   0 ≤ pieces ≤ MAX_COUNT                      │
//! │        ▼                                                                │
//! │  CashLine { amount = denomination × pieces }[]  ──► total_cash          │
//! │                                                                         │
//! │  PaymentRecord[] (same sale date) ──► Cash category sum = expected      │
//! │  reconcile(counted, expected)     ──► variance, Balanced│Over│Short     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::payment::categorize_payment;
use crate::types::{DailyCashCountLine, PaymentRecord};
use crate::validation::{validate_count, MAX_COUNT};

/// Accepted denominations in centavos, largest first.
pub const DENOMINATIONS: [i64; 10] = [
    100_000, 50_000, 20_000, 10_000, 5_000, 2_000, 1_000, 500, 100, 25,
];

/// Whether `centavos` is a bill or coin the count sheet lists.
pub fn is_denomination(centavos: i64) -> bool {
    DENOMINATIONS.contains(&centavos)
}

/// Sheet label for a denomination: "₱1,000" or "₱0.25".
pub fn denomination_label(centavos: i64) -> String {
    let money = Money::from_centavos(centavos);
    if money.centavos_part() == 0 {
        let grouped = money.format_grouped(crate::money::PESO_SIGN);
        grouped.trim_end_matches(".00").to_string()
    } else {
        money.format_grouped(crate::money::PESO_SIGN)
    }
}

// =============================================================================
// Lines
// =============================================================================

/// Pieces counted for one denomination, as entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashLineInput {
    pub denomination_centavos: i64,
    pub pieces: i64,
}

/// A validated line with its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashLine {
    pub denomination: Money,
    pub pieces: i64,
    pub amount: Money,
}

impl From<&DailyCashCountLine> for CashLine {
    fn from(line: &DailyCashCountLine) -> Self {
        CashLine {
            denomination: Money::from_centavos(line.denomination_centavos),
            pieces: line.pieces,
            amount: Money::from_centavos(line.amount_centavos),
        }
    }
}

/// Validates entered lines and computes their amounts.
///
/// Lines come back sorted largest denomination first. Zero-piece lines are
/// kept so the saved sheet shows every row the counter filled in.
///
/// ## Example
/// ```rust
/// use salesdesk_core::cash::{normalize_lines, total_cash, CashLineInput};
/// use salesdesk_core::money::Money;
///
/// let lines = normalize_lines(&[
///     CashLineInput { denomination_centavos: 25, pieces: 4 },
///     CashLineInput { denomination_centavos: 100_000, pieces: 3 },
/// ]).unwrap();
/// assert_eq!(lines[0].amount, Money::from_pesos(3_000));
/// assert_eq!(total_cash(&lines), Money::from_pesos(3_001));
/// ```
pub fn normalize_lines(inputs: &[CashLineInput]) -> CoreResult<Vec<CashLine>> {
    let mut seen: Vec<i64> = Vec::with_capacity(inputs.len());
    let mut lines = Vec::with_capacity(inputs.len());

    for input in inputs {
        let denomination = Money::from_centavos(input.denomination_centavos);
        if !is_denomination(input.denomination_centavos) {
            return Err(CoreError::UnknownDenomination(denomination.to_string()));
        }
        if seen.contains(&input.denomination_centavos) {
            return Err(CoreError::DuplicateDenomination(denomination.to_string()));
        }
        validate_count("pieces", input.pieces)?;
        seen.push(input.denomination_centavos);

        let amount = denomination
            .multiply_quantity(input.pieces)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "pieces".to_string(),
                min: 0,
                max: MAX_COUNT,
            })?;

        lines.push(CashLine {
            denomination,
            pieces: input.pieces,
            amount,
        });
    }

    lines.sort_by(|a, b| b.denomination.cmp(&a.denomination));
    Ok(lines)
}

/// Sum of line amounts.
pub fn total_cash(lines: &[CashLine]) -> Money {
    lines.iter().map(|l| l.amount).sum()
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Outcome of comparing counted cash with recorded cash payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStatus {
    Balanced,
    Over,
    Short,
}

impl ReconciliationStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            ReconciliationStatus::Balanced => "Balanced",
            ReconciliationStatus::Over => "Over",
            ReconciliationStatus::Short => "Short",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub expected_cash: Money,
    pub counted_cash: Money,
    /// counted − expected
    pub variance: Money,
    pub status: ReconciliationStatus,
}

/// Sum of payments that categorise as cash.
pub fn expected_cash(payments: &[PaymentRecord]) -> Money {
    payments
        .iter()
        .filter(|p| categorize_payment(p.mode.as_deref(), p.mode_type.as_deref()).is_cash())
        .map(PaymentRecord::amount)
        .sum()
}

/// Compares a counted total with the cash payments recorded for the day.
pub fn reconcile(counted_cash: Money, payments: &[PaymentRecord]) -> Reconciliation {
    let expected = expected_cash(payments);
    let variance = counted_cash - expected;

    let status = if variance.is_zero() {
        ReconciliationStatus::Balanced
    } else if variance.is_positive() {
        ReconciliationStatus::Over
    } else {
        ReconciliationStatus::Short
    };

    Reconciliation {
        expected_cash: expected,
        counted_cash,
        variance,
        status,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(denomination_centavos: i64, pieces: i64) -> CashLineInput {
        CashLineInput {
            denomination_centavos,
            pieces,
        }
    }

    fn cash_payment(mode: &str, pesos: i64) -> PaymentRecord {
        PaymentRecord {
            sale_entry_id: "e".to_string(),
            mode: Some(mode.to_string()),
            mode_type: None,
            amount_centavos: pesos * 100,
        }
    }

    #[test]
    fn test_denominations_descending() {
        let mut sorted = DENOMINATIONS;
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sorted, DENOMINATIONS);
        assert!(is_denomination(25));
        assert!(!is_denomination(10));
    }

    #[test]
    fn test_denomination_labels() {
        assert_eq!(denomination_label(100_000), "₱1,000");
        assert_eq!(denomination_label(100), "₱1");
        assert_eq!(denomination_label(25), "₱0.25");
    }

    #[test]
    fn test_normalize_computes_amounts_and_sorts() {
        let lines = normalize_lines(&[line(2_000, 7), line(50_000, 2), line(25, 0)]).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].denomination, Money::from_pesos(500));
        assert_eq!(lines[0].amount, Money::from_pesos(1_000));
        assert_eq!(lines[1].amount, Money::from_pesos(140));
        assert_eq!(lines[2].amount, Money::zero());
        assert_eq!(total_cash(&lines), Money::from_pesos(1_140));
    }

    #[test]
    fn test_normalize_rejects_unknown_denomination() {
        let err = normalize_lines(&[line(300, 1)]).unwrap_err();
        assert!(matches!(err, CoreError::UnknownDenomination(_)));
    }

    #[test]
    fn test_normalize_rejects_duplicates() {
        let err = normalize_lines(&[line(100, 1), line(100, 2)]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateDenomination(_)));
    }

    #[test]
    fn test_normalize_rejects_negative_pieces() {
        let err = normalize_lines(&[line(100, -1)]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_normalize_rejects_huge_pieces() {
        let err = normalize_lines(&[line(100_000, 99_999_999_999_999)]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "pieces"
        ));

        let lines = normalize_lines(&[line(100_000, MAX_COUNT)]).unwrap();
        assert_eq!(lines[0].amount, Money::from_pesos(1_000 * MAX_COUNT));
    }

    #[test]
    fn test_reconcile_balanced() {
        let payments = vec![cash_payment("cash", 1_000), cash_payment("e-wallet", 500)];
        let result = reconcile(Money::from_pesos(1_000), &payments);
        assert_eq!(result.expected_cash, Money::from_pesos(1_000));
        assert_eq!(result.status, ReconciliationStatus::Balanced);
        assert!(result.variance.is_zero());
    }

    #[test]
    fn test_reconcile_excludes_provider_typed_cash_mode() {
        let mut gcash_under_cash = cash_payment("cash", 700);
        gcash_under_cash.mode_type = Some("gcash".to_string());
        let payments = vec![cash_payment("cash", 1_000), gcash_under_cash];

        let result = reconcile(Money::from_pesos(1_000), &payments);
        assert_eq!(result.expected_cash, Money::from_pesos(1_000));
        assert_eq!(result.status, ReconciliationStatus::Balanced);
    }

    #[test]
    fn test_reconcile_over_and_short() {
        let payments = vec![cash_payment("Cash", 1_000)];

        let over = reconcile(Money::from_pesos(1_050), &payments);
        assert_eq!(over.status, ReconciliationStatus::Over);
        assert_eq!(over.variance, Money::from_pesos(50));

        let short = reconcile(Money::zero(), &payments);
        assert_eq!(short.status, ReconciliationStatus::Short);
        assert_eq!(short.variance, Money::from_pesos(-1_000));
    }
}
