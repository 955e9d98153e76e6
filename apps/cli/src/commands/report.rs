//! # Report Commands
//!
//! Sales, inventory and payment reports over the saved entries.
//!
//! Every report takes the same [`ReportQuery`]: optional inclusive dates and
//! a free-text search. The query is validated once in [`build_filter`] and
//! the repositories do the filtering; aggregation is pure core code.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::DbState;
use salesdesk_core::package::{bucket_package, PackageBucket};
use salesdesk_core::report::{
    breakdown_by_category, breakdown_by_mode, build_inventory_report, summarize_package_sales,
    CategoryBreakdown, InventoryRow, InventoryTotals, PackageSalesSummary, PaymentBreakdown,
    ReportFilter,
};
use salesdesk_core::validation::{
    parse_date, parse_optional_date, validate_date_range, validate_search_query,
};
use salesdesk_core::SalesReportRow;

/// Report filters as typed by the operator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub search: Option<String>,
}

/// Validates a query into a repository filter.
pub fn build_filter(query: &ReportQuery) -> Result<ReportFilter, ApiError> {
    let date_from = parse_optional_date("date_from", query.date_from.as_deref().unwrap_or(""))?;
    let date_to = parse_optional_date("date_to", query.date_to.as_deref().unwrap_or(""))?;
    validate_date_range(date_from, date_to)?;

    if let Some(search) = &query.search {
        validate_search_query(search)?;
    }

    Ok(ReportFilter {
        date_from,
        date_to,
        search: query.search.clone(),
    })
}

// =============================================================================
// Sales
// =============================================================================

/// One sales report line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRowDto {
    pub sale_entry_id: String,
    pub sale_date: Option<NaiveDate>,
    pub member_name: Option<String>,
    pub po_number: Option<String>,
    pub username: Option<String>,
    pub package_type: Option<String>,
    pub package_bucket: PackageBucket,
    pub quantity: i64,
    pub total_sales_centavos: i64,
    pub created_at: DateTime<Utc>,
}

impl From<SalesReportRow> for SalesRowDto {
    fn from(row: SalesReportRow) -> Self {
        SalesRowDto {
            package_bucket: bucket_package(row.package_type.as_deref()),
            sale_entry_id: row.sale_entry_id,
            sale_date: row.sale_date,
            member_name: row.member_name,
            po_number: row.po_number,
            username: row.username,
            package_type: row.package_type,
            quantity: row.quantity,
            total_sales_centavos: row.total_sales_centavos,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportResponse {
    pub rows: Vec<SalesRowDto>,
    pub summary: PackageSalesSummary,
    pub filtered: bool,
}

/// Sales rows (newest first) with the per-package summary.
pub async fn sales_report(db: &DbState, query: &ReportQuery) -> Result<SalesReportResponse, ApiError> {
    debug!(?query, "sales_report command");

    let filter = build_filter(query)?;
    let rows = db.inner().reports().sales_rows(&filter).await?;
    let summary = summarize_package_sales(&rows);

    Ok(SalesReportResponse {
        rows: rows.into_iter().map(SalesRowDto::from).collect(),
        summary,
        filtered: filter.is_filtered(),
    })
}

// =============================================================================
// Inventory
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReportResponse {
    pub rows: Vec<InventoryRow>,
    pub totals: InventoryTotals,
    pub filtered: bool,
}

/// Inventory report over the filtered entries, newest first.
pub async fn inventory_report(
    db: &DbState,
    query: &ReportQuery,
) -> Result<InventoryReportResponse, ApiError> {
    debug!(?query, "inventory_report command");

    let filter = build_filter(query)?;
    let records = db.inner().reports().inventory_rows(&filter).await?;
    let report = build_inventory_report(&records);

    Ok(InventoryReportResponse {
        rows: report.rows,
        totals: report.totals,
        filtered: filter.is_filtered(),
    })
}

/// Inventory report of one sale date, in encoding order.
pub async fn inventory_report_for_date(
    db: &DbState,
    date: &str,
) -> Result<InventoryReportResponse, ApiError> {
    debug!(date = %date, "inventory_report_for_date command");

    let date = parse_date("date", date)?;
    let records = db.inner().reports().inventory_rows_for_date(date).await?;
    let report = build_inventory_report(&records);

    Ok(InventoryReportResponse {
        rows: report.rows,
        totals: report.totals,
        filtered: true,
    })
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReportResponse {
    pub by_mode: PaymentBreakdown,
    pub by_category: CategoryBreakdown,
    pub payment_count: usize,
}

/// Payment breakdowns for the entries matching the query.
pub async fn payment_report(
    db: &DbState,
    query: &ReportQuery,
) -> Result<PaymentReportResponse, ApiError> {
    debug!(?query, "payment_report command");

    let filter = build_filter(query)?;
    let payments = db.inner().reports().payment_records(&filter).await?;

    Ok(PaymentReportResponse {
        by_mode: breakdown_by_mode(&payments),
        by_category: breakdown_by_category(&payments),
        payment_count: payments.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::encoder::{apply_fields, save_entry};
    use crate::error::ErrorCode;
    use crate::state::{ConfigState, EncoderState};
    use salesdesk_core::encoder::FormField;
    use salesdesk_core::payment::PaymentCategory;
    use salesdesk_core::Money;
    use salesdesk_db::{Database, DbConfig};

    async fn encode(db: &DbState, fields: &[(FormField, &str)]) {
        let config = ConfigState::default();
        let encoder = EncoderState::new(&config.location);
        apply_fields(
            &encoder,
            fields.iter().map(|(f, v)| (*f, v.to_string())),
        );
        save_entry(db, &encoder, &config).await.unwrap();
    }

    async fn seeded() -> DbState {
        let db = DbState::new(Database::new(DbConfig::in_memory()).await.unwrap());

        encode(
            &db,
            &[
                (FormField::Date, "2026-02-07"),
                (FormField::MemberName, "Ana Cruz"),
                (FormField::PackageType, "gold"),
                (FormField::Quantity, "1"),
                (FormField::ModeOfPayment, "cash"),
                (FormField::ReleasedBottle, "3"),
            ],
        )
        .await;
        encode(
            &db,
            &[
                (FormField::Date, "2026-02-08"),
                (FormField::MemberName, "Ben Reyes"),
                (FormField::PackageType, "silver"),
                (FormField::Quantity, "2"),
                (FormField::ModeOfPayment, "e-wallet"),
                (FormField::PaymentModeType, "gcash"),
                (FormField::ModeOfPayment2, "cash"),
                (FormField::Amount2, "200"),
            ],
        )
        .await;

        db
    }

    fn query(from: Option<&str>, to: Option<&str>, search: Option<&str>) -> ReportQuery {
        ReportQuery {
            date_from: from.map(str::to_string),
            date_to: to.map(str::to_string),
            search: search.map(str::to_string),
        }
    }

    #[test]
    fn test_build_filter_rejects_inverted_range() {
        let err = build_filter(&query(Some("2026-02-08"), Some("2026-02-01"), None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_build_filter_blank_values() {
        let filter = build_filter(&query(Some(""), None, Some("  "))).unwrap();
        assert!(filter.date_from.is_none());
        assert!(!filter.is_filtered());
    }

    #[tokio::test]
    async fn test_sales_report_summary() {
        let db = seeded().await;
        let report = sales_report(&db, &ReportQuery::default()).await.unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].member_name.as_deref(), Some("Ben Reyes"));
        assert_eq!(report.rows[0].package_bucket, PackageBucket::Silver);
        assert!(!report.filtered);

        // Gold 10,500 outsells Silver 2 x 3,500
        assert_eq!(report.summary.rows[0].package_name, "Gold (3 bottles)");
        assert_eq!(report.summary.total_qty, 3);
        assert_eq!(report.summary.grand_total, Money::from_pesos(17_500));
    }

    #[tokio::test]
    async fn test_inventory_report_for_date() {
        let db = seeded().await;
        let report = inventory_report_for_date(&db, "2026-02-07").await.unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].package_gold, 1);
        assert_eq!(report.rows[0].released_bottle, 3);
        assert_eq!(report.totals.bottles, 3);

        assert!(inventory_report_for_date(&db, "not a date").await.is_err());
    }

    #[tokio::test]
    async fn test_payment_report_follows_filters() {
        let db = seeded().await;

        let all = payment_report(&db, &ReportQuery::default()).await.unwrap();
        assert_eq!(all.payment_count, 3);
        assert_eq!(all.by_category.amount_for(PaymentCategory::Cash), Money::from_pesos(10_700));
        assert_eq!(all.by_category.amount_for(PaymentCategory::GCash), Money::from_pesos(7_000));

        let ben = payment_report(&db, &query(None, None, Some("ben"))).await.unwrap();
        assert_eq!(ben.payment_count, 2);
        assert_eq!(ben.by_mode.total, Money::from_pesos(7_200));

        let nobody = payment_report(&db, &query(None, None, Some("nobody"))).await.unwrap();
        assert_eq!(nobody.payment_count, 0);
        assert!(nobody.by_mode.rows.is_empty());
        assert!(nobody.by_mode.total.is_zero());
    }
}
