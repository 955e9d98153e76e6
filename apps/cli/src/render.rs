//! # Terminal Output
//!
//! Plain-text tables for command responses. `--json` bypasses this module
//! and prints the response with serde_json instead.

use std::fmt::Write;

use crate::commands::cash::{CashCountResponse, ReconciliationResponse};
use crate::commands::encoder::{EncoderResponse, EntryDetailResponse, SaveEntryResponse};
use crate::commands::forms::{FormSubmissionResponse, PrintResponse};
use crate::commands::options::OptionsResponse;
use crate::commands::report::{InventoryReportResponse, PaymentReportResponse, SalesReportResponse};
use crate::state::ConfigState;
use salesdesk_core::pricing::{format_percent, PricingSummary};
use salesdesk_core::report::{MISSING, UNKNOWN};

fn or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(MISSING)
}

fn rule(out: &mut String, width: usize) {
    out.push_str(&"─".repeat(width));
    out.push('\n');
}

// `write!` into a String cannot fail; results are dropped with `let _`.

pub fn pricing(config: &ConfigState, pricing: &PricingSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<22}{:>16}", "Original price", config.format_money(pricing.original_price));
    let _ = writeln!(out, "{:<22}{:>16}", "Discount", format_percent(pricing.discount_bps));
    let _ = writeln!(out, "{:<22}{:>16}", "One-time discount", config.format_money(pricing.one_time_discount));
    let _ = writeln!(out, "{:<22}{:>16}", "Price after discount", config.format_money(pricing.price_after_discount));
    rule(&mut out, 38);
    let _ = writeln!(out, "{:<22}{:>16}", "TOTAL SALES", config.format_money(pricing.total_sales));
    out
}

pub fn encoder(config: &ConfigState, response: &EncoderResponse) -> String {
    let form = &response.form;
    let mut out = String::new();
    let _ = writeln!(out, "{:<22}{}", "Location", form.location);
    let _ = writeln!(out, "{:<22}{}", "Date", or_missing(Some(form.date.as_str())));
    let _ = writeln!(out, "{:<22}{}", "Member", or_missing(Some(form.member_name.as_str())));
    let _ = writeln!(out, "{:<22}{}", "Package", or_missing(Some(form.package_type.as_str())));
    let _ = writeln!(out, "{:<22}{}", "Quantity", or_missing(Some(form.quantity.as_str())));
    let _ = writeln!(out, "{:<22}{}", "Blister count", or_missing(Some(form.blister_count.as_str())));
    let _ = writeln!(out, "{:<22}{}", "Payment 1", or_missing(Some(form.mode_of_payment.as_str())));
    let _ = writeln!(out, "{:<22}{}", "Payment 2", or_missing(Some(form.mode_of_payment2.as_str())));
    rule(&mut out, 38);
    out.push_str(&pricing(config, &response.pricing));
    out
}

pub fn saved_entry(config: &ConfigState, response: &SaveEntryResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Saved entry {} ({})",
        response.entry_id,
        config.format_currency(response.total_sales_centavos)
    );
    let _ = writeln!(
        out,
        "  payments: {}  inventory: {}",
        response.payments_saved,
        if response.inventory_saved { "yes" } else { "no" }
    );
    if let Some(warning) = &response.warning {
        let _ = writeln!(out, "  warning: {}", warning);
    }
    out
}

pub fn entry_detail(config: &ConfigState, detail: &EntryDetailResponse) -> String {
    let entry = &detail.entry;
    let mut out = String::new();
    let sale_date = entry.sale_date.map(|d| d.to_string());
    let _ = writeln!(out, "Entry {} ({})", entry.id, entry.location);
    let _ = writeln!(out, "{:<22}{}", "Date", or_missing(sale_date.as_deref()));
    let _ = writeln!(out, "{:<22}{}", "Member", or_missing(entry.member_name.as_deref()));
    let _ = writeln!(out, "{:<22}{}", "PO number", or_missing(entry.po_number.as_deref()));
    let _ = writeln!(out, "{:<22}{}", "Package", or_missing(entry.package_type.as_deref()));
    let _ = writeln!(out, "{:<22}{}", "Quantity", entry.quantity);
    let _ = writeln!(out, "{:<22}{}", "Blister count", entry.blister_count);
    let _ = writeln!(out, "{:<22}{:>16}", "Original price", config.format_money(entry.original_price()));
    let _ = writeln!(out, "{:<22}{:>16}", "Discount", format_percent(entry.discount_bps));
    let _ = writeln!(out, "{:<22}{:>16}", "One-time discount", config.format_currency(entry.one_time_discount_centavos));
    rule(&mut out, 38);
    let _ = writeln!(out, "{:<22}{:>16}", "TOTAL SALES", config.format_money(entry.total_sales()));

    for payment in &detail.payments {
        let _ = writeln!(
            out,
            "Payment {}: {} {} {}",
            payment.payment_no,
            or_missing(payment.mode.as_deref()),
            or_missing(payment.mode_type.as_deref()),
            config.format_money(payment.amount())
        );
    }
    for movement in &detail.inventory {
        let _ = writeln!(
            out,
            "Released {} bottle / {} blister, to follow {} bottle / {} blister",
            movement.released_bottle,
            movement.released_blister,
            movement.to_follow_bottle,
            movement.to_follow_blister
        );
    }
    out
}

pub fn sales_report(config: &ConfigState, report: &SalesReportResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10}  {:<24}  {:<12}  {:<24}  {:>4}  {:>14}",
        "Date", "Member", "PO", "Package", "Qty", "Total"
    );
    rule(&mut out, 98);
    for row in &report.rows {
        let date = row
            .sale_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| MISSING.to_string());
        let _ = writeln!(
            out,
            "{:<10}  {:<24}  {:<12}  {:<24}  {:>4}  {:>14}",
            date,
            or_missing(row.member_name.as_deref()),
            or_missing(row.po_number.as_deref()),
            row.package_type.as_deref().filter(|p| !p.is_empty()).unwrap_or(UNKNOWN),
            row.quantity,
            config.format_currency(row.total_sales_centavos)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<28}  {:>5}  {:>14}  {:>14}", "Package", "Qty", "Avg price", "Amount");
    rule(&mut out, 67);
    for row in &report.summary.rows {
        let _ = writeln!(
            out,
            "{:<28}  {:>5}  {:>14}  {:>14}",
            row.package_name,
            row.qty,
            config.format_money(row.price),
            config.format_money(row.amount)
        );
    }
    rule(&mut out, 67);
    let _ = writeln!(
        out,
        "{:<28}  {:>5}  {:>14}  {:>14}",
        "Total",
        report.summary.total_qty,
        "",
        config.format_money(report.summary.total_amount)
    );
    let _ = writeln!(out, "Grand total: {}", config.format_money(report.summary.grand_total));
    out
}

pub fn inventory_report(config: &ConfigState, report: &InventoryReportResponse) -> String {
    let header = format!(
        "{:<20} {:<8} {:<10} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>14}",
        "Name", "GG#", "POF#", "PLAT", "GOLD", "SILV", "BOT", "BLIS", "VOUC", "DISC",
        "BOTS", "BLS", "R.BO", "R.BL", "F.BO", "F.BL", "Amount"
    );
    let width = header.chars().count();

    let mut out = String::new();
    let _ = writeln!(out, "{}", header);
    rule(&mut out, width);
    for r in &report.rows {
        let _ = writeln!(
            out,
            "{:<20} {:<8} {:<10} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>14}",
            r.name, r.gg_trans_no, r.pof_number,
            r.package_plat, r.package_gold, r.package_silver,
            r.retail_bottle, r.retail_blister, r.retail_voucher, r.retail_disc,
            r.bottles, r.blisters,
            r.released_bottle, r.released_blister, r.to_follow_bottle, r.to_follow_blister,
            config.format_money(r.amount)
        );
    }
    rule(&mut out, width);
    let t = &report.totals;
    let _ = writeln!(
        out,
        "{:<20} {:<8} {:<10} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>14}",
        "TOTAL", "", "",
        t.package_plat, t.package_gold, t.package_silver,
        t.retail_bottle, t.retail_blister, t.retail_voucher, t.retail_disc,
        t.bottles, t.blisters,
        t.released_bottle, t.released_blister, t.to_follow_bottle, t.to_follow_blister,
        config.format_money(t.amount)
    );
    out
}

pub fn payment_report(config: &ConfigState, report: &PaymentReportResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<24}  {:>14}", "Mode of payment", "Amount");
    rule(&mut out, 40);
    for row in &report.by_mode.rows {
        let _ = writeln!(out, "{:<24}  {:>14}", row.mode, config.format_money(row.amount));
    }
    rule(&mut out, 40);
    let _ = writeln!(out, "{:<24}  {:>14}", "Total", config.format_money(report.by_mode.total));

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<24}  {:>5}  {:>14}", "Category", "Count", "Amount");
    rule(&mut out, 47);
    for row in &report.by_category.rows {
        let _ = writeln!(
            out,
            "{:<24}  {:>5}  {:>14}",
            row.label,
            row.count,
            config.format_money(row.amount)
        );
    }
    rule(&mut out, 47);
    let _ = writeln!(
        out,
        "{:<24}  {:>5}  {:>14}",
        "Total",
        report.payment_count,
        config.format_money(report.by_category.total)
    );
    out
}

pub fn cash_count(config: &ConfigState, sheet: &CashCountResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Cash count {} ({}){}",
        sheet.cash_date,
        sheet.created_by,
        if sheet.saved { "" } else { " - not saved yet" }
    );
    let _ = writeln!(out, "{:<14}  {:>7}  {:>14}", "Denomination", "Pieces", "Amount");
    rule(&mut out, 39);
    for line in &sheet.lines {
        let _ = writeln!(
            out,
            "{:<14}  {:>7}  {:>14}",
            line.label,
            line.pieces,
            config.format_currency(line.amount_centavos)
        );
    }
    rule(&mut out, 39);
    let _ = writeln!(
        out,
        "{:<14}  {:>7}  {:>14}",
        "Total cash",
        "",
        config.format_currency(sheet.total_cash_centavos)
    );
    out
}

pub fn reconciliation(config: &ConfigState, result: &ReconciliationResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Cash reconciliation {}", result.cash_date);
    let _ = writeln!(out, "{:<16}{:>16}", "Expected cash", config.format_currency(result.expected_cash_centavos));
    let _ = writeln!(out, "{:<16}{:>16}", "Counted cash", config.format_currency(result.counted_cash_centavos));
    let _ = writeln!(out, "{:<16}{:>16}", "Variance", config.format_currency(result.variance_centavos));
    let _ = writeln!(out, "{:<16}{:>16}", "Status", result.status.label());
    if !result.counted {
        let _ = writeln!(out, "(no cash count saved for this date)");
    }
    out
}

pub fn form_submission(form: &FormSubmissionResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} ({})", form.form_type, form.reference_no, form.id);
    let _ = writeln!(out, "updated {}", form.updated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "{}", form.payload);
    out
}

pub fn print(response: &PrintResponse) -> String {
    format!(
        "Printed {} (print #{}) at {}\n",
        response.reference_no,
        response.print_count,
        response.printed_at.format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn options(config: &ConfigState, options: &OptionsResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Location: {}", options.location);
    let _ = writeln!(out, "Member types: {}", options.member_types.join(", "));
    let _ = writeln!(out, "Packages:");
    for p in &options.packages {
        let _ = writeln!(
            out,
            "  {:<26}{:>14}  per {}",
            p.label,
            config.format_currency(p.unit_price_centavos),
            if p.priced_by_blister_count { "blister" } else { "package" }
        );
    }
    let discounts: Vec<String> = options.discount_percents.iter().map(|d| format!("{}%", d)).collect();
    let _ = writeln!(out, "Discounts: {}", discounts.join(", "));
    let modes: Vec<&str> = options.payment_modes.iter().map(|m| m.value).collect();
    let _ = writeln!(out, "Payment modes: {}", modes.join(", "));
    let types: Vec<&str> = options.payment_types.iter().map(|m| m.value).collect();
    let _ = writeln!(out, "Payment types: {}", types.join(", "));
    let denominations: Vec<&str> = options.denominations.iter().map(|d| d.label.as_str()).collect();
    let _ = writeln!(out, "Denominations: {}", denominations.join(", "));
    let forms: Vec<&str> = options.form_types.iter().map(|f| f.code).collect();
    let _ = writeln!(out, "Form types: {}", forms.join(", "));
    out
}

pub fn config(config: &ConfigState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Location:  {}", config.location);
    let _ = writeln!(out, "User:      {}", config.user_id);
    let _ = writeln!(out, "Currency:  {} ({})", config.currency_code, config.currency_symbol);
    let _ = writeln!(
        out,
        "Database:  {}",
        config
            .database_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "platform data directory".to_string())
    );
    out
}
