//! # Report Aggregation
//!
//! Spreadsheet-style aggregation over rows read from the report views.
//!
//! ## Reports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SalesReportRow[]       ──► summarize_package_sales ──► PackageSales    │
//! │  PaymentRecord[]        ──► breakdown_by_mode       ──► PaymentBreakdown│
//! │  PaymentRecord[]        ──► breakdown_by_category   ──► CategoryBreakdown│
//! │  InventoryReportRecord[]──► build_inventory_report  ──► InventoryReport │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions are single pass and stateless.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::package::{bucket_package, PackageBucket};
use crate::payment::{categorize_payment, PaymentCategory};
use crate::types::{InventoryReportRecord, PaymentRecord, SalesReportRow};

/// Placeholder shown for missing text columns.
pub const MISSING: &str = "—";

/// Label used when a package or mode is missing.
pub const UNKNOWN: &str = "Unknown";

// =============================================================================
// Filters
// =============================================================================

/// Date range and free-text search shared by all report queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Inclusive lower bound on sale date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on sale date.
    pub date_to: Option<NaiveDate>,
    /// Matched against member name, PO number and username.
    pub search: Option<String>,
}

impl ReportFilter {
    /// Filter for exactly one sale date.
    pub fn for_date(date: NaiveDate) -> Self {
        ReportFilter {
            date_from: Some(date),
            date_to: Some(date),
            search: None,
        }
    }

    /// Trimmed search text, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// True when any filter is set.
    pub fn is_filtered(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some() || self.search_term().is_some()
    }

    /// Search text folded the same way as [`search_key`].
    pub fn search_needle(&self) -> Option<String> {
        self.search_term().map(str::to_lowercase)
    }
}

/// Lower-cased text a sale entry is searched by.
///
/// Folding happens here rather than in SQL so that accented names match
/// regardless of case. Fields are joined with a unit separator so a match
/// never spans two of them.
///
/// ## Example
/// ```rust
/// use salesdesk_core::report::search_key;
///
/// let key = search_key(&[Some("JOSÉ PEÑA"), Some("PO-7"), None]);
/// assert!(key.contains("peña"));
/// ```
pub fn search_key(fields: &[Option<&str>]) -> String {
    fields
        .iter()
        .map(|field| field.unwrap_or_default().to_lowercase())
        .collect::<Vec<_>>()
        .join("\u{1f}")
}

// =============================================================================
// Package Sales Summary
// =============================================================================

/// One package line of the sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSalesRow {
    pub package_name: String,
    pub qty: i64,
    /// Average realised price per unit; zero when no units were sold.
    pub price: Money,
    pub amount: Money,
}

/// Package sales table plus its totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSalesSummary {
    pub rows: Vec<PackageSalesRow>,
    pub total_qty: i64,
    pub total_amount: Money,
    /// Sum of total sales over every entry row.
    pub grand_total: Money,
}

/// Groups sales rows by package label.
///
/// Rows are sorted by amount descending; ties keep first-seen order.
pub fn summarize_package_sales(entries: &[SalesReportRow]) -> PackageSalesSummary {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, (i64, Money)> = HashMap::new();

    for entry in entries {
        let name = entry
            .package_type
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string();

        let slot = grouped.entry(name.clone()).or_insert_with(|| {
            order.push(name);
            (0, Money::zero())
        });
        slot.0 = slot.0.saturating_add(entry.quantity);
        slot.1 += entry.total_sales();
    }

    let mut rows: Vec<PackageSalesRow> = order
        .into_iter()
        .filter_map(|name| {
            let (qty, amount) = grouped.remove(&name)?;
            let price = amount.divide_rounded(qty);
            Some(PackageSalesRow {
                package_name: name,
                qty,
                price,
                amount,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));

    PackageSalesSummary {
        total_qty: rows.iter().map(|r| r.qty).sum(),
        total_amount: rows.iter().map(|r| r.amount).sum(),
        grand_total: entries.iter().map(SalesReportRow::total_sales).sum(),
        rows,
    }
}

// =============================================================================
// Payment Breakdown
// =============================================================================

/// Amount collected under one raw mode-of-payment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentModeRow {
    pub mode: String,
    pub amount: Money,
}

/// Payments grouped by the mode text as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub rows: Vec<PaymentModeRow>,
    pub total: Money,
}

/// Groups payments by raw mode, largest amount first.
pub fn breakdown_by_mode(payments: &[PaymentRecord]) -> PaymentBreakdown {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Money> = HashMap::new();

    for payment in payments {
        let mode = payment
            .mode
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string();
        *grouped.entry(mode.clone()).or_insert_with(|| {
            order.push(mode);
            Money::zero()
        }) += payment.amount();
    }

    let mut rows: Vec<PaymentModeRow> = order
        .into_iter()
        .filter_map(|mode| {
            let amount = grouped.remove(&mode)?;
            Some(PaymentModeRow { mode, amount })
        })
        .collect();
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));

    PaymentBreakdown {
        total: rows.iter().map(|r| r.amount).sum(),
        rows,
    }
}

/// Amount and payment count for one fixed category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: PaymentCategory,
    pub label: String,
    pub count: usize,
    pub amount: Money,
}

/// Every category in fixed order, including empty ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub rows: Vec<CategoryRow>,
    pub total: Money,
}

impl CategoryBreakdown {
    pub fn amount_for(&self, category: PaymentCategory) -> Money {
        self.rows
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.amount)
            .unwrap_or_default()
    }
}

/// Buckets payments into the twelve report categories.
pub fn breakdown_by_category(payments: &[PaymentRecord]) -> CategoryBreakdown {
    let mut rows: Vec<CategoryRow> = PaymentCategory::ALL
        .iter()
        .map(|category| CategoryRow {
            category: *category,
            label: category.label().to_string(),
            count: 0,
            amount: Money::zero(),
        })
        .collect();

    for payment in payments {
        let category = categorize_payment(payment.mode.as_deref(), payment.mode_type.as_deref());
        // ALL is declared in enum order, so the discriminant indexes the row
        if let Some(row) = rows.get_mut(category as usize) {
            row.count += 1;
            row.amount += payment.amount();
        }
    }

    CategoryBreakdown {
        total: rows.iter().map(|r| r.amount).sum(),
        rows,
    }
}

// =============================================================================
// Inventory Report
// =============================================================================

/// One line of the printed inventory report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    pub name: String,
    pub gg_trans_no: String,
    pub pof_number: String,
    pub package_plat: i64,
    pub package_gold: i64,
    pub package_silver: i64,
    pub retail_bottle: i64,
    pub retail_blister: i64,
    pub retail_voucher: i64,
    pub retail_disc: i64,
    pub bottles: i64,
    pub blisters: i64,
    pub released_bottle: i64,
    pub released_blister: i64,
    pub to_follow_bottle: i64,
    pub to_follow_blister: i64,
    pub amount: Money,
}

/// Column sums of the inventory report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTotals {
    pub package_plat: i64,
    pub package_gold: i64,
    pub package_silver: i64,
    pub retail_bottle: i64,
    pub retail_blister: i64,
    pub retail_voucher: i64,
    pub retail_disc: i64,
    pub bottles: i64,
    pub blisters: i64,
    pub released_bottle: i64,
    pub released_blister: i64,
    pub to_follow_bottle: i64,
    pub to_follow_blister: i64,
    pub amount: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryReport {
    pub rows: Vec<InventoryRow>,
    pub totals: InventoryTotals,
}

fn text_or_missing(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

/// Maps one view record into report columns.
pub fn map_inventory_record(record: &InventoryReportRecord) -> InventoryRow {
    let bucket = bucket_package(record.package_type.as_deref());
    let is_package = bucket.is_package();
    let quantity = record.quantity;

    let gg_trans_no = if record.sale_entry_id.is_empty() {
        MISSING.to_string()
    } else {
        record.sale_entry_id.chars().take(8).collect()
    };

    InventoryRow {
        name: text_or_missing(record.member_name.as_deref()),
        gg_trans_no,
        pof_number: text_or_missing(record.po_number.as_deref()),
        package_plat: if bucket == PackageBucket::Platinum { quantity } else { 0 },
        package_gold: if bucket == PackageBucket::Gold { quantity } else { 0 },
        package_silver: if bucket == PackageBucket::Silver { quantity } else { 0 },
        retail_bottle: if is_package { 0 } else { quantity },
        retail_blister: if is_package { 0 } else { record.blister_count },
        retail_voucher: 0,
        retail_disc: 0,
        bottles: record.released_bottle + record.to_follow_bottle,
        blisters: record.released_blister + record.to_follow_blister,
        released_bottle: record.released_bottle,
        released_blister: record.released_blister,
        to_follow_bottle: record.to_follow_bottle,
        to_follow_blister: record.to_follow_blister,
        amount: Money::from_centavos(record.total_sales_centavos),
    }
}

/// Builds the inventory report rows and totals, keeping record order.
pub fn build_inventory_report(records: &[InventoryReportRecord]) -> InventoryReport {
    let rows: Vec<InventoryRow> = records.iter().map(map_inventory_record).collect();

    let totals = rows.iter().fold(InventoryTotals::default(), |mut t, r| {
        t.package_plat += r.package_plat;
        t.package_gold += r.package_gold;
        t.package_silver += r.package_silver;
        t.retail_bottle += r.retail_bottle;
        t.retail_blister += r.retail_blister;
        t.retail_voucher += r.retail_voucher;
        t.retail_disc += r.retail_disc;
        t.bottles += r.bottles;
        t.blisters += r.blisters;
        t.released_bottle += r.released_bottle;
        t.released_blister += r.released_blister;
        t.to_follow_bottle += r.to_follow_bottle;
        t.to_follow_blister += r.to_follow_blister;
        t.amount += r.amount;
        t
    });

    InventoryReport { rows, totals }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sales_row(package: Option<&str>, qty: i64, total_pesos: i64) -> SalesReportRow {
        SalesReportRow {
            sale_entry_id: "id".to_string(),
            sale_date: None,
            member_name: None,
            po_number: None,
            username: None,
            package_type: package.map(str::to_string),
            quantity: qty,
            total_sales_centavos: total_pesos * 100,
            created_at: Utc.with_ymd_and_hms(2026, 2, 8, 9, 0, 0).unwrap(),
        }
    }

    fn payment(mode: Option<&str>, mode_type: Option<&str>, pesos: i64) -> PaymentRecord {
        PaymentRecord {
            sale_entry_id: "id".to_string(),
            mode: mode.map(str::to_string),
            mode_type: mode_type.map(str::to_string),
            amount_centavos: pesos * 100,
        }
    }

    fn inventory_record(id: &str, package: &str, qty: i64, blisters: i64) -> InventoryReportRecord {
        InventoryReportRecord {
            sale_entry_id: id.to_string(),
            sale_date: None,
            member_name: Some("Ana Cruz".to_string()),
            po_number: None,
            username: None,
            package_type: Some(package.to_string()),
            quantity: qty,
            blister_count: blisters,
            released_bottle: 2,
            released_blister: 1,
            to_follow_bottle: 1,
            to_follow_blister: 0,
            total_sales_centavos: 100_000,
            created_at: Utc.with_ymd_and_hms(2026, 2, 8, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_filter_search_term() {
        let filter = ReportFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), None);
        assert!(!filter.is_filtered());

        let filter = ReportFilter {
            search: Some("  cruz ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), Some("cruz"));
        assert!(filter.is_filtered());
    }

    #[test]
    fn test_package_summary_groups_and_sorts() {
        let rows = vec![
            sales_row(Some("Silver (1 bottle)"), 1, 3_500),
            sales_row(Some("Gold (3 bottles)"), 2, 21_000),
            sales_row(Some("Silver (1 bottle)"), 2, 7_000),
            sales_row(None, 1, 500),
        ];
        let summary = summarize_package_sales(&rows);

        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.rows[0].package_name, "Gold (3 bottles)");
        assert_eq!(summary.rows[0].price, Money::from_pesos(10_500));
        assert_eq!(summary.rows[1].package_name, "Silver (1 bottle)");
        assert_eq!(summary.rows[1].qty, 3);
        assert_eq!(summary.rows[1].amount, Money::from_pesos(10_500));
        assert_eq!(summary.rows[2].package_name, UNKNOWN);
        assert_eq!(summary.total_qty, 6);
        assert_eq!(summary.total_amount, Money::from_pesos(32_000));
        assert_eq!(summary.grand_total, Money::from_pesos(32_000));
    }

    #[test]
    fn test_package_summary_zero_qty_price() {
        let summary = summarize_package_sales(&[sales_row(Some("Retail (1 bottle)"), 0, 100)]);
        assert_eq!(summary.rows[0].price, Money::zero());
    }

    #[test]
    fn test_package_summary_price_rounds_half_up() {
        let rows = vec![SalesReportRow {
            total_sales_centavos: 1_001,
            ..sales_row(Some("Blister (1 blister pack)"), 2, 0)
        }];
        // 10.01 / 2 = 5.005
        let summary = summarize_package_sales(&rows);
        assert_eq!(summary.rows[0].price, Money::from_centavos(501));

        let rows = vec![SalesReportRow {
            total_sales_centavos: 1_000,
            ..sales_row(Some("Blister (1 blister pack)"), 3, 0)
        }];
        // 10.00 / 3 = 3.333
        let summary = summarize_package_sales(&rows);
        assert_eq!(summary.rows[0].price, Money::from_centavos(333));
    }

    #[test]
    fn test_search_key_folds_unicode() {
        let key = search_key(&[Some("JOSÉ PEÑA"), None, Some("Jpena")]);
        assert!(key.contains("josé peña"));
        assert!(key.contains("jpena"));
        assert!(!key.contains("peñaj"));

        let filter = ReportFilter {
            search: Some("  PEÑA ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_needle().as_deref(), Some("peña"));
    }

    #[test]
    fn test_package_summary_empty() {
        let summary = summarize_package_sales(&[]);
        assert!(summary.rows.is_empty());
        assert_eq!(summary.grand_total, Money::zero());
    }

    #[test]
    fn test_breakdown_by_mode() {
        let payments = vec![
            payment(Some("cash"), None, 100),
            payment(Some("e-wallet"), Some("gcash"), 300),
            payment(Some("cash"), None, 250),
            payment(None, None, 10),
        ];
        let breakdown = breakdown_by_mode(&payments);

        assert_eq!(breakdown.rows[0].mode, "cash");
        assert_eq!(breakdown.rows[0].amount, Money::from_pesos(350));
        assert_eq!(breakdown.rows[1].mode, "e-wallet");
        assert_eq!(breakdown.rows[2].mode, UNKNOWN);
        assert_eq!(breakdown.total, Money::from_pesos(660));
    }

    #[test]
    fn test_breakdown_by_category() {
        let payments = vec![
            payment(Some("cash"), None, 100),
            payment(Some("e-wallet"), Some("gcash"), 300),
            payment(Some("bank-transfer"), Some("bdo"), 1_000),
            payment(Some("Cash"), None, 50),
        ];
        let breakdown = breakdown_by_category(&payments);

        assert_eq!(breakdown.rows.len(), 12);
        assert_eq!(breakdown.rows[0].category, PaymentCategory::Cash);
        assert_eq!(breakdown.rows[0].count, 2);
        assert_eq!(breakdown.amount_for(PaymentCategory::Cash), Money::from_pesos(150));
        assert_eq!(breakdown.amount_for(PaymentCategory::GCash), Money::from_pesos(300));
        assert_eq!(breakdown.amount_for(PaymentCategory::Bdo), Money::from_pesos(1_000));
        assert_eq!(breakdown.amount_for(PaymentCategory::Voucher), Money::zero());
        assert_eq!(breakdown.total, Money::from_pesos(1_450));
    }

    #[test]
    fn test_inventory_package_row() {
        let row = map_inventory_record(&inventory_record(
            "3f2a9c1e-aaaa-bbbb-cccc-000000000000",
            "Gold (3 bottles)",
            2,
            5,
        ));
        assert_eq!(row.gg_trans_no, "3f2a9c1e");
        assert_eq!(row.pof_number, MISSING);
        assert_eq!(row.package_gold, 2);
        assert_eq!(row.package_plat, 0);
        assert_eq!(row.retail_bottle, 0);
        assert_eq!(row.retail_blister, 0);
        assert_eq!(row.bottles, 3);
        assert_eq!(row.blisters, 1);
    }

    #[test]
    fn test_inventory_retail_row() {
        let row = map_inventory_record(&inventory_record("abc", "Blister (1 blister pack)", 0, 4));
        assert_eq!(row.gg_trans_no, "abc");
        assert_eq!(row.retail_bottle, 0);
        assert_eq!(row.retail_blister, 4);
        assert_eq!(row.package_silver, 0);
    }

    #[test]
    fn test_inventory_totals() {
        let report = build_inventory_report(&[
            inventory_record("a", "Platinum (10 bottles)", 1, 0),
            inventory_record("b", "Retail (1 bottle)", 3, 0),
        ]);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.totals.package_plat, 1);
        assert_eq!(report.totals.retail_bottle, 3);
        assert_eq!(report.totals.bottles, 6);
        assert_eq!(report.totals.amount, Money::from_pesos(2_000));
    }
}
