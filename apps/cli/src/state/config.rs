//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SALESDESK_*`)
//! 2. A `.env` file in the working directory (loaded by `main` via dotenvy)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup, so no mutex is needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use salesdesk_core::encoder::DEFAULT_LOCATION;
use salesdesk_core::money::{Money, PESO_SIGN};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Location stamped on new sale entries.
    pub location: String,

    /// Operator recorded as `created_by` on entries and cash counts.
    pub user_id: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Database file override. `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for a single front desk.
    ///
    /// ## Default Values
    /// - Location: "Davao Office"
    /// - User: "local"
    /// - Currency: PHP (₱)
    fn default() -> Self {
        ConfigState {
            location: DEFAULT_LOCATION.to_string(),
            user_id: "local".to_string(),
            currency_code: "PHP".to_string(),
            currency_symbol: PESO_SIGN.to_string(),
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SALESDESK_DB_PATH`: Database file path
    /// - `SALESDESK_LOCATION`: Location for new entries
    /// - `SALESDESK_USER_ID`: Operator id
    /// - `SALESDESK_CURRENCY_SYMBOL`: Display symbol
    ///
    /// Blank values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = var("SALESDESK_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(location) = var("SALESDESK_LOCATION") {
            config.location = location;
        }

        if let Some(user_id) = var("SALESDESK_USER_ID") {
            config.user_id = user_id;
        }

        if let Some(symbol) = var("SALESDESK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats a centavo amount as a grouped currency string.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_cli::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(123_456), "₱1,234.56");
    /// ```
    pub fn format_currency(&self, centavos: i64) -> String {
        self.format_money(Money::from_centavos(centavos))
    }

    /// Same as [`ConfigState::format_currency`] for a `Money` value.
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_grouped(&self.currency_symbol)
    }
}
