//! # Validation Module
//!
//! Input validation for encoder submissions, report filters and form
//! tracking.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  └── Types, required arguments                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands                                                     │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (cash_date, created_by)                                    │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank or non-numeric text in a numeric field reads as zero, the way the
//! encoder always behaved. Numbers that *are* readable are checked: counts
//! must be whole, non-negative and at most [`MAX_COUNT`].
//!
//! ## Usage
//! ```rust
//! use salesdesk_core::validation::{parse_count_field, validate_discount_bps, parse_date};
//!
//! validate_discount_bps(750).unwrap();
//! assert_eq!(parse_count_field("quantity", "3").unwrap(), 3);
//! assert!(parse_count_field("quantity", "1.5").is_err());
//! assert!(parse_date("sale_date", "2026-02-08").is_ok());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::pricing::MAX_DISCOUNT_BPS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest free-text search accepted by the report filters.
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Longest text accepted in a single encoder text field.
pub const MAX_TEXT_LENGTH: usize = 500;

/// Largest quantity, blister count, stock count or piece count accepted.
pub const MAX_COUNT: i64 = 1_000_000;

/// Date format used by every date field and filter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Dates
// =============================================================================

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected a date as YYYY-MM-DD".to_string(),
    })
}

/// Parses an optional date field: blank text is `None`.
pub fn parse_optional_date(field: &str, value: &str) -> ValidationResult<Option<NaiveDate>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(field, value).map(Some)
    }
}

/// Validates that a date range is not inverted.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use salesdesk_core::validation::validate_date_range;
///
/// let feb1 = NaiveDate::from_ymd_opt(2026, 2, 1);
/// let feb8 = NaiveDate::from_ymd_opt(2026, 2, 8);
/// assert!(validate_date_range(feb1, feb8).is_ok());
/// assert!(validate_date_range(feb8, feb1).is_err());
/// assert!(validate_date_range(None, feb1).is_ok());
/// ```
pub fn validate_date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ValidationResult<()> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(ValidationError::InvalidFormat {
            field: "date_from".to_string(),
            reason: "must not be after date_to".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Numbers
// =============================================================================

/// Validates a discount in basis points.
///
/// ## Rules
/// - 0% to 100% inclusive; the dropdown only offers 0-20, but any value in
///   range prices correctly, fractions included
/// - the error is worded in percent, the unit the operator typed
pub fn validate_discount_bps(bps: i64) -> ValidationResult<()> {
    if !(0..=MAX_DISCOUNT_BPS).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: MAX_DISCOUNT_BPS / 100,
        });
    }
    Ok(())
}

/// Validates a stock or piece count: 0 to [`MAX_COUNT`].
pub fn validate_count(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    if value > MAX_COUNT {
        return Err(count_out_of_range(field));
    }
    Ok(())
}

fn count_out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: MAX_COUNT,
    }
}

/// Parses and validates a count typed on the form.
///
/// ## Rules
/// - blank or non-numeric text is 0
/// - `"2"`, `"2."` and `"2.00"` are 2
/// - a fractional count such as `"1.5"` is rejected, never truncated
/// - negative or above [`MAX_COUNT`] is rejected
pub fn parse_count_field(field: &str, text: &str) -> ValidationResult<i64> {
    let text = text.trim();
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let digits = whole.strip_prefix('-').unwrap_or(whole);

    let numeric = !(digits.is_empty() && fraction.is_empty())
        && digits.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit());
    if !numeric {
        return Ok(0);
    }

    if fraction.chars().any(|c| c != '0') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        });
    }

    let value = if digits.is_empty() {
        0
    } else {
        // only digits remain, so a parse failure is an overflow
        whole.parse::<i64>().map_err(|_| count_out_of_range(field))?
    };

    validate_count(field, value)?;
    Ok(value)
}

// =============================================================================
// Strings
// =============================================================================

/// Validates optional free text length.
pub fn validate_text(field: &str, value: Option<&str>) -> ValidationResult<()> {
    match value {
        Some(text) if text.chars().count() > MAX_TEXT_LENGTH => Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LENGTH,
        }),
        _ => Ok(()),
    }
}

/// Validates a report search query.
///
/// Blank queries are allowed and mean "no search".
pub fn validate_search_query(query: &str) -> ValidationResult<()> {
    if query.trim().chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }
    Ok(())
}

/// Validates a record id (UUID string).
pub fn validate_uuid(field: &str, value: &str) -> ValidationResult<()> {
    uuid::Uuid::parse_str(value.trim())
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a valid UUID".to_string(),
        })
}

/// Validates that a required text value is present.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("d", "2026-02-08").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 8).unwrap()
        );
        assert!(matches!(parse_date("d", ""), Err(ValidationError::Required { .. })));
        assert!(matches!(
            parse_date("d", "08/02/2026"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("d", "  ").unwrap(), None);
        assert!(parse_optional_date("d", "2026-13-01").is_err());
    }

    #[test]
    fn test_discount_bps() {
        assert!(validate_discount_bps(0).is_ok());
        assert!(validate_discount_bps(750).is_ok());
        assert!(validate_discount_bps(10_000).is_ok());
        assert!(validate_discount_bps(10_001).is_err());
        assert!(validate_discount_bps(-1).is_err());

        let err = validate_discount_bps(15_000).unwrap_err();
        assert_eq!(err.to_string(), "discount_percent must be between 0 and 100");
    }

    #[test]
    fn test_counts() {
        assert!(validate_count("quantity", 0).is_ok());
        assert!(validate_count("quantity", MAX_COUNT).is_ok());
        assert!(matches!(
            validate_count("quantity", -3),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
        assert!(matches!(
            validate_count("pieces", MAX_COUNT + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_count_field() {
        assert_eq!(parse_count_field("quantity", " 3 ").unwrap(), 3);
        assert_eq!(parse_count_field("quantity", "2.00").unwrap(), 2);
        assert_eq!(parse_count_field("quantity", "2.").unwrap(), 2);
        assert_eq!(parse_count_field("quantity", "").unwrap(), 0);
        assert_eq!(parse_count_field("quantity", "two").unwrap(), 0);
        assert_eq!(parse_count_field("quantity", "-").unwrap(), 0);
    }

    #[test]
    fn test_parse_count_field_rejects_fractions_and_huge_values() {
        assert!(matches!(
            parse_count_field("quantity", "1.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_count_field("quantity", ".5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_count_field("quantity", "99999999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
        // beyond i64 entirely
        assert!(matches!(
            parse_count_field("quantity", "99999999999999999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_count_field("released_bottle", "-1"),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_search_query() {
        assert!(validate_search_query("").is_ok());
        assert!(validate_search_query("cruz").is_ok());
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_text_length() {
        assert!(validate_text("remarks", None).is_ok());
        assert!(validate_text("remarks", Some(&"r".repeat(501))).is_err());
    }

    #[test]
    fn test_uuid() {
        assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("id", "not-a-uuid").is_err());
    }

    #[test]
    fn test_required() {
        assert!(validate_required("created_by", "user-1").is_ok());
        assert!(validate_required("created_by", "  ").is_err());
    }
}
