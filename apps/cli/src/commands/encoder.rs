//! # Encoder Commands
//!
//! Commands for filling in and saving the sales encoder form.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save_entry()                                                           │
//! │     │                                                                   │
//! │     ├── form.to_submission(user) ── validation error? ──► ApiError      │
//! │     │                                                                   │
//! │     ├── insert sale entry ───────── failure? ───────────► ApiError      │
//! │     │                                                                   │
//! │     ├── insert payments (0..=2) ─── failure? ──► warn, keep going       │
//! │     ├── insert inventory (0..=1) ── failure? ──► warn, keep going       │
//! │     │                                                                   │
//! │     └── reset form, return SaveEntryResponse { warning, .. }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{ConfigState, DbState, EncoderState};
use salesdesk_core::encoder::{EncoderForm, FormField, SaleSubmission};
use salesdesk_core::pricing::{PackageType, PricingSummary};
use salesdesk_core::{CoreError, InventoryMovement, SaleEntry, SalePayment};
use salesdesk_db::Database;

/// Warning returned when the entry saved but a child insert did not.
pub const PARTIAL_SAVE_WARNING: &str = "Entry saved, but some related records failed";

/// Form contents with the derived price fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncoderResponse {
    pub form: EncoderForm,
    pub pricing: PricingSummary,
}

impl From<&EncoderForm> for EncoderResponse {
    fn from(form: &EncoderForm) -> Self {
        EncoderResponse {
            form: form.clone(),
            pricing: form.pricing(),
        }
    }
}

/// Result of a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEntryResponse {
    pub entry_id: String,
    pub sale_date: Option<NaiveDate>,
    pub total_sales_centavos: i64,
    pub payments_saved: usize,
    pub inventory_saved: bool,
    /// Set when the entry saved but a payment or inventory insert failed.
    pub warning: Option<String>,
}

/// A stored entry with everything saved alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetailResponse {
    pub entry: SaleEntry,
    pub payments: Vec<SalePayment>,
    pub inventory: Vec<InventoryMovement>,
}

/// Accepts a stored package label or a short name ("gold", "Blister").
///
/// Anything else is passed through unchanged and prices at zero.
pub fn resolve_package_label(input: &str) -> String {
    let trimmed = input.trim();
    if PackageType::from_label(trimmed).is_some() {
        return trimmed.to_string();
    }

    let lowered = trimmed.to_lowercase();
    PackageType::ALL
        .into_iter()
        .find(|p| p.label().to_lowercase().starts_with(&lowered) && !lowered.is_empty())
        .map(|p| p.label().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Gets the current form.
pub fn get_form(encoder: &EncoderState) -> EncoderResponse {
    debug!("get_form command");
    encoder.with_form(|form| EncoderResponse::from(form))
}

/// Sets one field.
pub fn update_field(encoder: &EncoderState, field: FormField, value: String) -> EncoderResponse {
    debug!(?field, value = %value, "update_field command");

    let value = if field == FormField::PackageType {
        resolve_package_label(&value)
    } else {
        value
    };

    encoder.with_form_mut(|form| {
        form.update(field, value);
        EncoderResponse::from(&*form)
    })
}

/// Sets several fields in order.
pub fn apply_fields(
    encoder: &EncoderState,
    fields: impl IntoIterator<Item = (FormField, String)>,
) -> EncoderResponse {
    let mut response = get_form(encoder);
    for (field, value) in fields {
        response = update_field(encoder, field, value);
    }
    response
}

/// Toggles the new-member checkbox.
pub fn set_new_member(encoder: &EncoderState, value: bool) -> EncoderResponse {
    debug!(value, "set_new_member command");
    encoder.with_form_mut(|form| {
        form.set_new_member(value);
        EncoderResponse::from(&*form)
    })
}

/// Derived price fields of the current form.
pub fn preview_pricing(encoder: &EncoderState) -> PricingSummary {
    debug!("preview_pricing command");
    encoder.with_form(EncoderForm::pricing)
}

/// Clears the form.
pub fn clear_form(encoder: &EncoderState) -> EncoderResponse {
    debug!("clear_form command");
    encoder.reset();
    get_form(encoder)
}

/// Validates and saves the current form, then clears it.
///
/// ## Errors
/// - Validation failures (negative counts, discount out of range, bad date)
/// - The sale entry insert failing
///
/// Payment and inventory failures do not fail the command; they come back
/// as [`SaveEntryResponse::warning`].
pub async fn save_entry(
    db: &DbState,
    encoder: &EncoderState,
    config: &ConfigState,
) -> Result<SaveEntryResponse, ApiError> {
    debug!("save_entry command");

    let submission = encoder.with_form(|form| form.to_submission(Some(config.user_id.as_str())))?;
    let response = save_submission(db.inner(), &submission).await?;

    encoder.reset();
    Ok(response)
}

/// Writes a built submission: the entry first, then its children.
pub async fn save_submission(
    db: &Database,
    submission: &SaleSubmission,
) -> Result<SaveEntryResponse, ApiError> {
    let entry = db.sale_entries().insert(&submission.entry).await?;
    let mut failed = false;

    let payments_saved = match db
        .payments()
        .insert_for_entry(&entry.id, &submission.payments)
        .await
    {
        Ok(saved) => saved.len(),
        Err(e) => {
            warn!(entry_id = %entry.id, error = %e, "Failed to save payments");
            failed = true;
            0
        }
    };

    let inventory_saved = match &submission.inventory {
        Some(movement) => match db.inventory().insert_for_entry(&entry.id, movement).await {
            Ok(_) => true,
            Err(e) => {
                warn!(entry_id = %entry.id, error = %e, "Failed to save inventory movement");
                failed = true;
                false
            }
        },
        None => false,
    };

    info!(
        entry_id = %entry.id,
        total_sales = %entry.total_sales(),
        payments = payments_saved,
        inventory = inventory_saved,
        "Sale entry saved"
    );

    Ok(SaveEntryResponse {
        entry_id: entry.id,
        sale_date: entry.sale_date,
        total_sales_centavos: entry.total_sales_centavos,
        payments_saved,
        inventory_saved,
        warning: failed.then(|| PARTIAL_SAVE_WARNING.to_string()),
    })
}

/// Loads a saved entry with its payments and inventory movements.
pub async fn get_entry(db: &DbState, id: &str) -> Result<EntryDetailResponse, ApiError> {
    debug!(id = %id, "get_entry command");

    let db = db.inner();
    let entry = db
        .sale_entries()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::SaleEntryNotFound(id.to_string()))?;
    let payments = db.payments().list_for_entry(&entry.id).await?;
    let inventory = db.inventory().list_for_entry(&entry.id).await?;

    Ok(EntryDetailResponse {
        entry,
        payments,
        inventory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use salesdesk_core::{Money, NewPayment};
    use salesdesk_db::DbConfig;

    async fn setup() -> (DbState, EncoderState, ConfigState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = ConfigState::default();
        let encoder = EncoderState::new(&config.location);
        (DbState::new(db), encoder, config)
    }

    fn fill_gold_sale(encoder: &EncoderState) {
        apply_fields(
            encoder,
            [
                (FormField::Date, "2026-02-08".to_string()),
                (FormField::MemberName, "Ana Cruz".to_string()),
                (FormField::PackageType, "gold".to_string()),
                (FormField::Quantity, "2".to_string()),
                (FormField::Discount, "10".to_string()),
                (FormField::ModeOfPayment, "cash".to_string()),
                (FormField::ReleasedBottle, "6".to_string()),
            ],
        );
    }

    #[test]
    fn test_resolve_package_label() {
        assert_eq!(resolve_package_label("gold"), "Gold (3 bottles)");
        assert_eq!(resolve_package_label("PLATINUM"), "Platinum (10 bottles)");
        assert_eq!(resolve_package_label("Blister (1 blister pack)"), "Blister (1 blister pack)");
        assert_eq!(resolve_package_label("mystery"), "mystery");
        assert_eq!(resolve_package_label(""), "");
    }

    #[test]
    fn test_update_field_recomputes_price() {
        let encoder = EncoderState::new("Davao Office");
        update_field(&encoder, FormField::PackageType, "silver".to_string());
        let response = update_field(&encoder, FormField::Quantity, "3".to_string());

        assert_eq!(response.form.package_type, "Silver (1 bottle)");
        assert_eq!(response.form.original_price, "10500.00");
        assert_eq!(response.pricing.total_sales, Money::from_pesos(10_500));
    }

    #[test]
    fn test_preview_applies_discounts() {
        let encoder = EncoderState::new("Davao Office");
        fill_gold_sale(&encoder);
        update_field(&encoder, FormField::OneTimeDiscount, "100".to_string());

        let pricing = preview_pricing(&encoder);
        assert_eq!(pricing.original_price, Money::from_pesos(21_000));
        assert_eq!(pricing.price_after_discount, Money::from_pesos(18_900));
        assert_eq!(pricing.total_sales, Money::from_pesos(18_800));
    }

    #[tokio::test]
    async fn test_save_entry_writes_children_and_clears() {
        let (db, encoder, config) = setup().await;
        fill_gold_sale(&encoder);
        set_new_member(&encoder, true);

        let response = save_entry(&db, &encoder, &config).await.unwrap();
        assert_eq!(response.total_sales_centavos, Money::from_pesos(18_900).centavos());
        assert_eq!(response.payments_saved, 1);
        assert!(response.inventory_saved);
        assert!(response.warning.is_none());

        let detail = get_entry(&db, &response.entry_id).await.unwrap();
        assert_eq!(detail.entry.location, "Davao Office");
        assert_eq!(detail.entry.created_by.as_deref(), Some("local"));
        assert_eq!(detail.entry.discount_bps, 1_000);
        assert!(detail.entry.is_new_member);
        assert_eq!(detail.payments[0].amount_centavos, response.total_sales_centavos);
        assert_eq!(detail.inventory[0].released_bottle, 6);

        let form = get_form(&encoder).form;
        assert!(form.member_name.is_empty());
        assert!(!form.new_member);
    }

    #[tokio::test]
    async fn test_get_missing_entry() {
        let (db, _, _) = setup().await;
        let err = get_entry(&db, "nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_fractional_quantity_is_not_saved() {
        let (db, encoder, config) = setup().await;
        fill_gold_sale(&encoder);
        update_field(&encoder, FormField::Quantity, "1.5".to_string());

        let err = save_entry(&db, &encoder, &config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("whole number"));
        assert_eq!(db.inner().sale_entries().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_saved() {
        let (db, encoder, config) = setup().await;
        fill_gold_sale(&encoder);
        update_field(&encoder, FormField::Date, "08/02/2026".to_string());

        let err = save_entry(&db, &encoder, &config).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(db.inner().sale_entries().count().await.unwrap(), 0);
        // the operator keeps what they typed
        assert_eq!(get_form(&encoder).form.member_name, "Ana Cruz");
    }

    #[tokio::test]
    async fn test_child_failure_is_a_warning() {
        let (db, encoder, config) = setup().await;
        fill_gold_sale(&encoder);

        let mut submission = encoder
            .with_form(|form| form.to_submission(Some(config.user_id.as_str())))
            .unwrap();
        // payment_no is limited to slots 1 and 2
        submission.payments.push(NewPayment {
            payment_no: 3,
            mode: Some("cash".to_string()),
            mode_type: None,
            reference_no: None,
            amount: Money::from_pesos(1),
        });

        let response = save_submission(db.inner(), &submission).await.unwrap();
        assert_eq!(response.warning.as_deref(), Some(PARTIAL_SAVE_WARNING));
        assert_eq!(response.payments_saved, 0);
        assert!(response.inventory_saved);
        assert_eq!(db.inner().sale_entries().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_zero_sale_without_mode_has_no_payment() {
        let (db, encoder, config) = setup().await;
        update_field(&encoder, FormField::MemberName, "Walk-in".to_string());

        let response = save_entry(&db, &encoder, &config).await.unwrap();
        assert_eq!(response.payments_saved, 0);
        assert!(!response.inventory_saved);
        assert!(response.sale_date.is_none());
    }
}
