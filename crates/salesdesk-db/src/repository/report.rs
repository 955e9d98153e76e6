//! # Report Repository
//!
//! Filtered reads over the report views and payment table.
//!
//! ## Query Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportFilter { date_from, date_to, search }                            │
//! │       │                                                                 │
//! │       ▼  push_filter()                                                  │
//! │  WHERE 1 = 1                                                            │
//! │    AND sale_date >= ?            (date_from, inclusive)                 │
//! │    AND sale_date <= ?            (date_to, inclusive)                   │
//! │    AND instr(search_key, ?) > 0  (search text, lower-cased in Rust)     │
//! │       │                                                                 │
//! │       ├── v_sales_report      ──► SalesReportRow[]      (newest first)  │
//! │       ├── v_inventory_report  ──► InventoryReportRecord[]               │
//! │       └── payments ⋈ entries  ──► PaymentRecord[]                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `search_key` is written on insert from member name, PO number and
//! username, already lower-cased with Unicode rules. SQLite's own `lower()`
//! only folds ASCII, so "peña" would never find "PEÑA" through it.
//!
//! Payments are always read through a join with their entry, so a filtered
//! breakdown only sees payments of matching entries and is empty when no
//! entry matches.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use salesdesk_core::report::ReportFilter;
use salesdesk_core::{InventoryReportRecord, PaymentRecord, SalesReportRow};

/// Appends the filter conditions for a source aliased as `alias`.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, alias: &str, filter: &ReportFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(from) = filter.date_from {
        builder.push(format!(" AND {alias}.sale_date >= "));
        builder.push_bind(from);
    }
    if let Some(to) = filter.date_to {
        builder.push(format!(" AND {alias}.sale_date <= "));
        builder.push_bind(to);
    }
    if let Some(needle) = filter.search_needle() {
        builder.push(format!(" AND instr({alias}.search_key, "));
        builder.push_bind(needle);
        builder.push(") > 0");
    }
}

#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Sales report rows, newest first.
    pub async fn sales_rows(&self, filter: &ReportFilter) -> DbResult<Vec<SalesReportRow>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                r.sale_entry_id, r.sale_date, r.member_name, r.po_number,
                r.username, r.package_type, r.quantity,
                r.total_sales_centavos, r.created_at
            FROM v_sales_report r
            "#,
        );
        push_filter(&mut builder, "r", filter);
        builder.push(" ORDER BY r.created_at DESC");

        let rows = builder
            .build_query_as::<SalesReportRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), filtered = filter.is_filtered(), "Loaded sales report rows");
        Ok(rows)
    }

    /// Inventory report records, newest first.
    pub async fn inventory_rows(&self, filter: &ReportFilter) -> DbResult<Vec<InventoryReportRecord>> {
        self.inventory_query(filter, "DESC").await
    }

    /// Inventory records for one sale date, in the order they were encoded.
    pub async fn inventory_rows_for_date(&self, date: NaiveDate) -> DbResult<Vec<InventoryReportRecord>> {
        self.inventory_query(&ReportFilter::for_date(date), "ASC").await
    }

    async fn inventory_query(
        &self,
        filter: &ReportFilter,
        direction: &'static str,
    ) -> DbResult<Vec<InventoryReportRecord>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                r.sale_entry_id, r.sale_date, r.member_name, r.po_number,
                r.username, r.package_type, r.quantity, r.blister_count,
                r.released_bottle, r.released_blister,
                r.to_follow_bottle, r.to_follow_blister,
                r.total_sales_centavos, r.created_at
            FROM v_inventory_report r
            "#,
        );
        push_filter(&mut builder, "r", filter);
        builder.push(format!(" ORDER BY r.created_at {direction}"));

        let rows = builder
            .build_query_as::<InventoryReportRecord>()
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), "Loaded inventory report rows");
        Ok(rows)
    }

    /// Payments of the entries matching `filter`.
    pub async fn payment_records(&self, filter: &ReportFilter) -> DbResult<Vec<PaymentRecord>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                p.sale_entry_id, p.mode, p.mode_type, p.amount_centavos
            FROM sales_entry_payments p
            JOIN sales_entries e ON e.id = p.sale_entry_id
            "#,
        );
        push_filter(&mut builder, "e", filter);
        builder.push(" ORDER BY e.created_at DESC, p.payment_no");

        let rows = builder
            .build_query_as::<PaymentRecord>()
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), "Loaded payment records");
        Ok(rows)
    }

    /// Payments of entries sold on `date`.
    pub async fn payments_for_date(&self, date: NaiveDate) -> DbResult<Vec<PaymentRecord>> {
        self.payment_records(&ReportFilter::for_date(date)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::test_support::{payment, sample_entry};
    use salesdesk_core::NewInventoryMovement;

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut first = sample_entry("2026-02-07", "Ana Cruz");
        first.po_number = Some("PO-1001".to_string());
        let first = db.sale_entries().insert(&first).await.unwrap();
        db.payments()
            .insert_for_entry(&first.id, &[payment(1, "cash", None, 10_500)])
            .await
            .unwrap();

        let mut second = sample_entry("2026-02-08", "Ben Reyes");
        second.username = Some("breyes".to_string());
        let second = db.sale_entries().insert(&second).await.unwrap();
        db.payments()
            .insert_for_entry(
                &second.id,
                &[payment(1, "e-wallet", Some("gcash"), 10_000), payment(2, "cash", None, 500)],
            )
            .await
            .unwrap();
        db.inventory()
            .insert_for_entry(
                &second.id,
                &NewInventoryMovement {
                    released_bottle: 3,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let third = sample_entry("2026-02-08", "Carla Diaz");
        db.sale_entries().insert(&third).await.unwrap();

        db
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_sales_rows_newest_first() {
        let db = seeded().await;
        let rows = db.reports().sales_rows(&ReportFilter::default()).await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].member_name.as_deref(), Some("Carla Diaz"));
        assert_eq!(rows[2].member_name.as_deref(), Some("Ana Cruz"));
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let db = seeded().await;
        let filter = ReportFilter {
            date_from: Some(date("2026-02-07")),
            date_to: Some(date("2026-02-07")),
            search: None,
        };
        let rows = db.reports().sales_rows(&filter).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].po_number.as_deref(), Some("PO-1001"));
    }

    #[tokio::test]
    async fn test_search_matches_name_po_and_username() {
        let db = seeded().await;
        let reports = db.reports();

        let by = |s: &str| ReportFilter {
            search: Some(s.to_string()),
            ..Default::default()
        };

        assert_eq!(reports.sales_rows(&by("ANA")).await.unwrap().len(), 1);
        assert_eq!(reports.sales_rows(&by("po-10")).await.unwrap().len(), 1);
        assert_eq!(reports.sales_rows(&by("BREYES")).await.unwrap().len(), 1);
        assert_eq!(reports.sales_rows(&by("nobody")).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_search_folds_accented_names() {
        let db = seeded().await;
        db.sale_entries()
            .insert(&sample_entry("2026-02-09", "JOSÉ PEÑA"))
            .await
            .unwrap();
        let reports = db.reports();

        let by = |s: &str| ReportFilter {
            search: Some(s.to_string()),
            ..Default::default()
        };

        let rows = reports.sales_rows(&by("peña")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member_name.as_deref(), Some("JOSÉ PEÑA"));
        assert_eq!(reports.sales_rows(&by("José")).await.unwrap().len(), 1);
        assert_eq!(reports.inventory_rows(&by("PEÑA")).await.unwrap().len(), 1);
        // no match across the member name / PO boundary
        assert_eq!(reports.sales_rows(&by("cruzpo")).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_inventory_rows_default_to_zero() {
        let db = seeded().await;
        let rows = db.reports().inventory_rows_for_date(date("2026-02-08")).await.unwrap();

        assert_eq!(rows.len(), 2);
        // oldest first for the single-date report
        assert_eq!(rows[0].member_name.as_deref(), Some("Ben Reyes"));
        assert_eq!(rows[0].released_bottle, 3);
        assert_eq!(rows[1].released_bottle, 0);
        assert_eq!(rows[1].to_follow_blister, 0);
    }

    #[tokio::test]
    async fn test_payment_records_follow_entry_filter() {
        let db = seeded().await;
        let reports = db.reports();

        let all = reports.payment_records(&ReportFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let feb8 = reports.payments_for_date(date("2026-02-08")).await.unwrap();
        assert_eq!(feb8.len(), 2);

        let none = reports
            .payment_records(&ReportFilter {
                search: Some("nobody".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
