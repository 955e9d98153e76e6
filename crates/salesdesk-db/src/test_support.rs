//! Fixtures shared by repository tests.

use chrono::NaiveDate;
use salesdesk_core::{Money, NewPayment, NewSaleEntry};

/// A one-Gold-package entry sold on `sale_date` to `member_name`.
pub fn sample_entry(sale_date: &str, member_name: &str) -> NewSaleEntry {
    NewSaleEntry {
        location: "Davao Office".to_string(),
        sale_date: NaiveDate::parse_from_str(sale_date, "%Y-%m-%d").ok(),
        po_number: None,
        member_name: Some(member_name.to_string()),
        username: None,
        is_new_member: false,
        member_type: Some("Distributor".to_string()),
        package_type: Some("Gold (3 bottles)".to_string()),
        to_blister: true,
        quantity: 1,
        blister_count: 0,
        original_price: Money::from_pesos(10_500),
        discount_bps: 0,
        price_after_discount: Money::from_pesos(10_500),
        one_time_discount: Money::zero(),
        total_sales: Money::from_pesos(10_500),
        remarks: None,
        received_by: None,
        collected_by: None,
        created_by: Some("user-1".to_string()),
    }
}

pub fn payment(payment_no: i64, mode: &str, mode_type: Option<&str>, pesos: i64) -> NewPayment {
    NewPayment {
        payment_no,
        mode: Some(mode.to_string()),
        mode_type: mode_type.map(str::to_string),
        reference_no: None,
        amount: Money::from_pesos(pesos),
    }
}
