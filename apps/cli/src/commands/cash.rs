//! # Cash Count Commands
//!
//! The daily cash count sheet and its reconciliation against recorded cash
//! payments.
//!
//! ## Sheet
//! ```text
//! ┌──────────────┬────────┬──────────────┐
//! │ Denomination │ Pieces │ Amount       │
//! ├──────────────┼────────┼──────────────┤
//! │ ₱1,000       │ 3      │ ₱3,000.00    │
//! │ ₱500         │ 0      │ ₱0.00        │
//! │ ...          │        │              │
//! │ ₱0.25        │ 4      │ ₱1.00        │
//! ├──────────────┴────────┼──────────────┤
//! │ Total cash            │ ₱3,001.00    │
//! └───────────────────────┴──────────────┘
//! ```
//! The sheet always lists every denomination; rows that were never saved
//! read as zero pieces.
//!
//! Counts belong to the configured operator (`ConfigState::user_id`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use salesdesk_core::cash::{
    denomination_label, normalize_lines, reconcile, CashLineInput, ReconciliationStatus,
    DENOMINATIONS,
};
use salesdesk_core::validation::parse_date;
use salesdesk_core::{DailyCashCount, Money};

/// One row of the count sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashLineDto {
    pub denomination_centavos: i64,
    pub label: String,
    pub pieces: i64,
    pub amount_centavos: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashCountResponse {
    pub cash_date: NaiveDate,
    pub created_by: String,
    /// False when nothing was saved for the date yet.
    pub saved: bool,
    pub lines: Vec<CashLineDto>,
    pub total_cash_centavos: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CashCountResponse {
    fn build(cash_date: NaiveDate, created_by: &str, count: Option<&DailyCashCount>) -> Self {
        let lines = DENOMINATIONS
            .iter()
            .map(|&denomination| {
                let saved = count.and_then(|c| {
                    c.lines
                        .iter()
                        .find(|l| l.denomination_centavos == denomination)
                });
                CashLineDto {
                    denomination_centavos: denomination,
                    label: denomination_label(denomination),
                    pieces: saved.map_or(0, |l| l.pieces),
                    amount_centavos: saved.map_or(0, |l| l.amount_centavos),
                }
            })
            .collect();

        CashCountResponse {
            cash_date,
            created_by: created_by.to_string(),
            saved: count.is_some(),
            lines,
            total_cash_centavos: count.map_or(0, |c| c.header.total_cash_centavos),
            updated_at: count.map(|c| c.header.updated_at),
        }
    }
}

/// Parses a `DENOMINATION=PIECES` pair, the denomination in pesos
/// (`1000=3`, `0.25=4`).
pub fn parse_cash_line(text: &str) -> Result<CashLineInput, ApiError> {
    let (denomination, pieces) = text
        .split_once('=')
        .ok_or_else(|| ApiError::validation(format!("Expected DENOMINATION=PIECES, got '{}'", text)))?;

    let denomination = Money::parse(denomination)
        .ok_or_else(|| ApiError::validation(format!("Invalid denomination '{}'", denomination.trim())))?;
    let pieces: i64 = pieces
        .trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("Invalid piece count '{}'", pieces.trim())))?;

    Ok(CashLineInput {
        denomination_centavos: denomination.centavos(),
        pieces,
    })
}

/// Gets the count sheet for a date.
pub async fn get_cash_count(
    db: &DbState,
    config: &ConfigState,
    date: &str,
) -> Result<CashCountResponse, ApiError> {
    debug!(date = %date, "get_cash_count command");

    let cash_date = parse_date("cash_date", date)?;
    let count = db.inner().cash_counts().get(cash_date, &config.user_id).await?;

    Ok(CashCountResponse::build(cash_date, &config.user_id, count.as_ref()))
}

/// Saves the count sheet for a date, replacing any earlier count.
pub async fn save_cash_count(
    db: &DbState,
    config: &ConfigState,
    date: &str,
    inputs: &[CashLineInput],
) -> Result<CashCountResponse, ApiError> {
    debug!(date = %date, lines = inputs.len(), "save_cash_count command");

    let cash_date = parse_date("cash_date", date)?;
    let lines = normalize_lines(inputs)?;
    let saved = db
        .inner()
        .cash_counts()
        .upsert(cash_date, &config.user_id, &lines)
        .await?;

    Ok(CashCountResponse::build(cash_date, &config.user_id, Some(&saved)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResponse {
    pub cash_date: NaiveDate,
    pub expected_cash_centavos: i64,
    pub counted_cash_centavos: i64,
    pub variance_centavos: i64,
    pub status: ReconciliationStatus,
    pub counted: bool,
}

/// Compares the day's count with the cash payments of entries sold that day.
///
/// A day without a count reconciles against zero counted cash.
pub async fn reconcile_cash(
    db: &DbState,
    config: &ConfigState,
    date: &str,
) -> Result<ReconciliationResponse, ApiError> {
    debug!(date = %date, "reconcile_cash command");

    let cash_date = parse_date("cash_date", date)?;
    let count = db.inner().cash_counts().get(cash_date, &config.user_id).await?;
    let payments = db.inner().reports().payments_for_date(cash_date).await?;

    let counted = count
        .as_ref()
        .map_or_else(Money::zero, |c| c.header.total_cash());
    let result = reconcile(counted, &payments);

    info!(
        cash_date = %cash_date,
        expected = %result.expected_cash,
        counted = %result.counted_cash,
        status = result.status.label(),
        "Cash reconciled"
    );

    Ok(ReconciliationResponse {
        cash_date,
        expected_cash_centavos: result.expected_cash.centavos(),
        counted_cash_centavos: result.counted_cash.centavos(),
        variance_centavos: result.variance.centavos(),
        status: result.status,
        counted: count.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::encoder::{apply_fields, save_entry};
    use crate::error::ErrorCode;
    use crate::state::EncoderState;
    use salesdesk_core::encoder::FormField;
    use salesdesk_db::{Database, DbConfig};

    async fn setup() -> (DbState, ConfigState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (DbState::new(db), ConfigState::default())
    }

    fn inputs(pairs: &[&str]) -> Vec<CashLineInput> {
        pairs.iter().map(|p| parse_cash_line(p).unwrap()).collect()
    }

    #[test]
    fn test_parse_cash_line() {
        assert_eq!(
            parse_cash_line("1000=3").unwrap(),
            CashLineInput { denomination_centavos: 100_000, pieces: 3 }
        );
        assert_eq!(
            parse_cash_line(" 0.25 = 4 ").unwrap(),
            CashLineInput { denomination_centavos: 25, pieces: 4 }
        );
        assert!(parse_cash_line("1000").is_err());
        assert!(parse_cash_line("abc=1").is_err());
        assert!(parse_cash_line("1000=x").is_err());
    }

    #[tokio::test]
    async fn test_unsaved_sheet_lists_every_denomination() {
        let (db, config) = setup().await;
        let sheet = get_cash_count(&db, &config, "2026-02-08").await.unwrap();

        assert!(!sheet.saved);
        assert_eq!(sheet.lines.len(), DENOMINATIONS.len());
        assert_eq!(sheet.lines[0].label, "₱1,000");
        assert!(sheet.lines.iter().all(|l| l.pieces == 0));
        assert_eq!(sheet.total_cash_centavos, 0);
    }

    #[tokio::test]
    async fn test_save_then_show() {
        let (db, config) = setup().await;
        save_cash_count(&db, &config, "2026-02-08", &inputs(&["0.25=4", "1000=3"]))
            .await
            .unwrap();

        let sheet = get_cash_count(&db, &config, "2026-02-08").await.unwrap();
        assert!(sheet.saved);
        assert_eq!(sheet.total_cash_centavos, 300_100);
        assert_eq!(sheet.lines[0].pieces, 3);
        assert_eq!(sheet.lines[9].amount_centavos, 100);
        assert_eq!(sheet.lines[1].pieces, 0);
    }

    #[tokio::test]
    async fn test_save_rejects_unknown_denomination() {
        let (db, config) = setup().await;
        let err = save_cash_count(&db, &config, "2026-02-08", &inputs(&["3=1"]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!get_cash_count(&db, &config, "2026-02-08").await.unwrap().saved);
    }

    #[tokio::test]
    async fn test_save_rejects_repeated_denomination() {
        let (db, config) = setup().await;
        let err = save_cash_count(&db, &config, "2026-02-08", &inputs(&["1000=1", "1000=2"]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn test_reconcile_against_cash_payments() {
        let (db, config) = setup().await;

        let encoder = EncoderState::new(&config.location);
        apply_fields(
            &encoder,
            [
                (FormField::Date, "2026-02-08".to_string()),
                (FormField::PackageType, "silver".to_string()),
                (FormField::Quantity, "1".to_string()),
                (FormField::ModeOfPayment, "cash".to_string()),
                (FormField::ModeOfPayment2, "e-wallet".to_string()),
                (FormField::PaymentModeType2, "gcash".to_string()),
                (FormField::Amount2, "500".to_string()),
            ],
        );
        save_entry(&db, &encoder, &config).await.unwrap();

        let uncounted = reconcile_cash(&db, &config, "2026-02-08").await.unwrap();
        assert!(!uncounted.counted);
        assert_eq!(uncounted.expected_cash_centavos, 350_000);
        assert_eq!(uncounted.status, ReconciliationStatus::Short);

        save_cash_count(&db, &config, "2026-02-08", &inputs(&["1000=3", "500=1"]))
            .await
            .unwrap();
        let balanced = reconcile_cash(&db, &config, "2026-02-08").await.unwrap();
        assert_eq!(balanced.variance_centavos, 0);
        assert_eq!(balanced.status, ReconciliationStatus::Balanced);

        save_cash_count(&db, &config, "2026-02-08", &inputs(&["1000=4"]))
            .await
            .unwrap();
        let over = reconcile_cash(&db, &config, "2026-02-08").await.unwrap();
        assert_eq!(over.variance_centavos, 50_000);
        assert_eq!(over.status, ReconciliationStatus::Over);
    }
}
