//! # Printable Form Tracking
//!
//! Form types and reference number formatting for printed forms. Storage
//! allocates the sequence; this module only names and formats it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Digits in the numeric part of a reference number.
pub const REFERENCE_DIGITS: usize = 6;

/// A printable form kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// Event report
    #[serde(rename = "ER")]
    EventReport,
    /// Special company event
    #[serde(rename = "SC")]
    SpecialCompanyEvent,
    /// Product inventory
    #[serde(rename = "PI")]
    ProductInventory,
}

impl FormType {
    pub const ALL: [FormType; 3] = [
        FormType::EventReport,
        FormType::SpecialCompanyEvent,
        FormType::ProductInventory,
    ];

    /// Stored code and reference prefix.
    pub const fn code(&self) -> &'static str {
        match self {
            FormType::EventReport => "ER",
            FormType::SpecialCompanyEvent => "SC",
            FormType::ProductInventory => "PI",
        }
    }

    /// Formats the `sequence`-th reference number for this type.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::forms::FormType;
    ///
    /// assert_eq!(FormType::EventReport.reference_no(1), "ER-000001");
    /// assert_eq!(FormType::ProductInventory.reference_no(1234567), "PI-1234567");
    /// ```
    pub fn reference_no(&self, sequence: i64) -> String {
        format!("{}-{:0width$}", self.code(), sequence, width = REFERENCE_DIGITS)
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FormType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        FormType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| CoreError::UnknownFormType(code.to_string()))
    }
}
