//! # Money Module
//!
//! Provides the `Money` type for handling peso amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    3500 × (1 − 0.15) = 2974.9999999999995                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    350000 centavos − 15% (1500 bps) = 297500 centavos = ₱2,975.00       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use salesdesk_core::money::Money;
//!
//! let price = Money::from_pesos(3500);                 // ₱3,500.00
//! let total = price.multiply_quantity(3).unwrap();     // ₱10,500.00
//! assert_eq!(total.centavos(), 1_050_000);
//!
//! // Free-text form input is parsed without going through f64
//! assert_eq!(Money::parse("1,250.50"), Some(Money::from_centavos(125_050)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Currency symbol used by the default formatter.
pub const PESO_SIGN: &str = "₱";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a Philippine peso).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results (e.g. price minus a large
///   one-time discount) may go negative before being clamped
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating add/sub**: amounts typed on the form are unbounded text,
///   so sums stop at the i64 limits instead of wrapping
///
/// ## Where Money is Used
/// ```text
/// Package unit price ──► original price ──► price after discount ──► total sales
///                                                                      │
///                          payment amounts ◄───────────────────────────┘
///                                │
///                                ▼
///                 payment breakdown / cash reconciliation
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::Money;
    ///
    /// let price = Money::from_centavos(77_900); // ₱779.00
    /// assert_eq!(price.pesos(), 779);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from whole pesos.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * 100)
    }

    /// Creates a Money value from pesos and centavos.
    ///
    /// For negative amounts only the peso part should carry the sign:
    /// `from_major_minor(-5, 50)` is -₱5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Floors the value at zero.
    ///
    /// Every derived price on the encoder is clamped this way: a one-time
    /// discount larger than the price yields ₱0.00, never a negative sale.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::Money;
    ///
    /// let unit_price = Money::from_pesos(779);
    /// assert_eq!(unit_price.multiply_quantity(4), Some(Money::from_centavos(311_600)));
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Divides by a positive count, rounding half away from zero.
    ///
    /// Returns zero when `count` is not positive.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::Money;
    ///
    /// // ₱100.00 over 3 units = 33.333… → ₱33.33; ₱0.05 over 2 = 2.5 → ₱0.03
    /// assert_eq!(Money::from_pesos(100).divide_rounded(3), Money::from_centavos(3_333));
    /// assert_eq!(Money::from_centavos(5).divide_rounded(2), Money::from_centavos(3));
    /// ```
    pub fn divide_rounded(&self, count: i64) -> Money {
        if count <= 0 {
            return Money::zero();
        }
        let numerator = self.0 as i128;
        let divisor = count as i128;
        let half = divisor / 2;
        let rounded = if numerator >= 0 {
            (numerator + half) / divisor
        } else {
            (numerator - half) / divisor
        };
        Money(rounded as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// The discount amount is rounded half-up to the nearest centavo.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::money::Money;
    ///
    /// let price = Money::from_pesos(3500);
    /// let discounted = price.apply_percentage_discount(1500); // 15% off
    /// assert_eq!(discounted, Money::from_pesos(2975));
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        // i128 keeps the intermediate product from overflowing
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_centavos(self.0 - discount_amount as i64)
    }

    /// Parses free-text numeric input into money.
    ///
    /// ## Accepted Input
    /// - optional sign, digits, optional `.` and decimals: `"1250.5"`
    /// - thousands separators are ignored: `"1,250.50"`
    /// - surrounding whitespace is ignored
    /// - more than two decimals are rounded half-up: `"0.125"` → ₱0.13
    ///
    /// Returns `None` for empty or malformed text. Form fields use
    /// [`Money::parse_or_zero`] so that a blank box reads as ₱0.00.
    pub fn parse(input: &str) -> Option<Money> {
        let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return None;
        }

        let (negative, unsigned) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let pesos: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };

        let mut digits = fraction.chars().map(|c| i64::from(c as u8 - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map_or(false, |d| d >= 5);

        let centavos = pesos
            .checked_mul(100)?
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))?;

        Some(Money(if negative { -centavos } else { centavos }))
    }

    /// Parses free-text input, reading anything unparseable as zero.
    #[inline]
    pub fn parse_or_zero(input: &str) -> Money {
        Money::parse(input).unwrap_or_default()
    }

    /// Formats with thousands separators, e.g. `₱1,234.56`.
    pub fn format_grouped(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.pesos().unsigned_abs()),
            self.centavos_part()
        )
    }

    /// Plain decimal rendering without symbol, as shown in read-only form
    /// fields (`"3500.00"`).
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.pesos().abs(), self.centavos_part())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an amount the way the reports show it: `₱1,234.56`.
pub fn format_php(amount: Money) -> String {
    amount.format_grouped(PESO_SIGN)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows `₱10.99`, ungrouped. Reports use [`format_php`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            PESO_SIGN,
            self.pesos().abs(),
            self.centavos_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_centavos() {
        let money = Money::from_centavos(1099);
        assert_eq!(money.centavos(), 1099);
        assert_eq!(money.pesos(), 10);
        assert_eq!(money.centavos_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).centavos(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).centavos(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_centavos(1099)), "₱10.99");
        assert_eq!(format!("{}", Money::from_centavos(-550)), "-₱5.50");
        assert_eq!(format!("{}", Money::zero()), "₱0.00");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_php(Money::from_pesos(35_000)), "₱35,000.00");
        assert_eq!(format_php(Money::from_centavos(123_456_789)), "₱1,234,567.89");
        assert_eq!(format_php(Money::from_pesos(779)), "₱779.00");
        assert_eq!(format_php(Money::from_centavos(-100_050)), "-₱1,000.50");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_pesos(3500).to_decimal_string(), "3500.00");
        assert_eq!(Money::from_centavos(5).to_decimal_string(), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_centavos(1000);
        let b = Money::from_centavos(500);
        assert_eq!((a + b).centavos(), 1500);
        assert_eq!((a - b).centavos(), 500);
        assert_eq!(a.multiply_quantity(3), Some(Money::from_centavos(3000)));

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.centavos(), 2000);
    }

    #[test]
    fn test_multiply_quantity_overflow() {
        let platinum = Money::from_pesos(35_000);
        assert_eq!(platinum.multiply_quantity(99_999_999_999_999), None);
        assert_eq!(Money::from_centavos(-1).multiply_quantity(i64::MIN), None);
    }

    #[test]
    fn test_add_sub_saturate() {
        let max = Money::from_centavos(i64::MAX);
        assert_eq!(max + Money::from_centavos(1), max);
        assert_eq!(Money::from_centavos(i64::MIN) - Money::from_centavos(1), Money::from_centavos(i64::MIN));

        let total: Money = vec![max, max].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_divide_rounded() {
        assert_eq!(Money::from_centavos(1_000).divide_rounded(4), Money::from_centavos(250));
        assert_eq!(Money::from_centavos(1_001).divide_rounded(2), Money::from_centavos(501));
        assert_eq!(Money::from_centavos(1_002).divide_rounded(3), Money::from_centavos(334));
        assert_eq!(Money::from_centavos(-5).divide_rounded(2), Money::from_centavos(-3));
        assert_eq!(Money::from_pesos(10).divide_rounded(0), Money::zero());
    }

    #[test]
    fn test_percentage_discount() {
        let price = Money::from_pesos(10_500);
        assert_eq!(price.apply_percentage_discount(1000), Money::from_pesos(9450));
        assert_eq!(price.apply_percentage_discount(0), price);
        assert_eq!(price.apply_percentage_discount(10_000), Money::zero());
    }

    #[test]
    fn test_percentage_discount_rounds_half_up() {
        // ₱7.79 at 5% = 0.3895 → 0.39 discount
        let price = Money::from_centavos(779);
        assert_eq!(price.apply_percentage_discount(500).centavos(), 740);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_centavos(-1).clamp_non_negative(), Money::zero());
        assert_eq!(Money::from_centavos(42).clamp_non_negative().centavos(), 42);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("3500"), Some(Money::from_pesos(3500)));
        assert_eq!(Money::parse(" 12.5 "), Some(Money::from_centavos(1250)));
        assert_eq!(Money::parse("1,250.05"), Some(Money::from_centavos(125_005)));
        assert_eq!(Money::parse(".75"), Some(Money::from_centavos(75)));
        assert_eq!(Money::parse("7."), Some(Money::from_pesos(7)));
        assert_eq!(Money::parse("-20"), Some(Money::from_pesos(-20)));
        assert_eq!(Money::parse("0.125"), Some(Money::from_centavos(13)));
        assert_eq!(Money::parse("0.124"), Some(Money::from_centavos(12)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("   "), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("1.2.3"), None);
        assert_eq!(Money::parse("."), None);
        assert_eq!(Money::parse("1e3"), None);
        assert_eq!(Money::parse_or_zero("n/a"), Money::zero());
    }
}
