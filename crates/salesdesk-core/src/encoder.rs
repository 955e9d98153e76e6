//! # Encoder Form
//!
//! Text-backed state of the sales encoder and the rules that turn it into a
//! storable submission.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EncoderForm::new()                                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  update(field, text) ──► package/quantity/blister changed?              │
//! │        │                        └── yes: original price recomputed      │
//! │        ▼                                                                │
//! │  pricing()  ──► PricingSummary (read-only fields)                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  to_submission(created_by) ──► SaleSubmission                           │
//! │        │                         ├── entry                              │
//! │        │                         ├── payments (0..=2)                   │
//! │        │                         └── inventory (only if any count > 0)  │
//! │        ▼                                                                │
//! │  reset() after a successful save                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field is kept as the text the operator typed. Numbers are parsed at
//! use; unparseable text reads as zero. The live preview never fails, while
//! [`EncoderForm::to_submission`] rejects fractional or oversized counts.

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{compute_original_price, compute_pricing, parse_discount_bps, PricingSummary};
use crate::types::{NewInventoryMovement, NewPayment, NewSaleEntry};
use crate::validation::{
    parse_count_field, parse_optional_date, validate_discount_bps, validate_text,
};

/// Location used when the form leaves it blank.
pub const DEFAULT_LOCATION: &str = "Davao Office";

/// Member types offered by the encoder.
pub const MEMBER_TYPE_OPTIONS: [&str; 5] = [
    "Distributor",
    "Mobile Stockist",
    "City Stockist",
    "Center",
    "Non-member",
];

/// Reads a count for the live preview.
///
/// Anything [`parse_count_field`] would reject previews as zero.
///
/// ## Example
/// ```rust
/// use salesdesk_core::encoder::parse_count;
///
/// assert_eq!(parse_count("3"), 3);
/// assert_eq!(parse_count(" 2.7 "), 0);
/// assert_eq!(parse_count(""), 0);
/// assert_eq!(parse_count("abc"), 0);
/// ```
pub fn parse_count(text: &str) -> i64 {
    parse_count_field("count", text).unwrap_or(0)
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =============================================================================
// Form State
// =============================================================================

/// Addressable text fields of the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Location,
    Date,
    PoNumber,
    MemberName,
    Username,
    MemberType,
    PackageType,
    ToBlister,
    Quantity,
    BlisterCount,
    Discount,
    OneTimeDiscount,
    ModeOfPayment,
    PaymentModeType,
    ReferenceNumber,
    ModeOfPayment2,
    PaymentModeType2,
    ReferenceNumber2,
    Amount2,
    ReleasedBottle,
    ReleasedBlister,
    ToFollowBottle,
    ToFollowBlister,
    Remarks,
    ReceivedBy,
    CollectedBy,
}

impl FormField {
    /// Fields whose change recomputes the original price.
    pub const fn affects_original_price(&self) -> bool {
        matches!(
            self,
            FormField::PackageType | FormField::Quantity | FormField::BlisterCount
        )
    }
}

/// Encoder form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderForm {
    pub location: String,
    pub date: String,
    pub po_number: String,
    pub member_name: String,
    pub username: String,
    pub new_member: bool,
    pub member_type: String,
    pub package_type: String,
    /// "yes", "no" or blank.
    pub to_blister: String,
    pub quantity: String,
    pub blister_count: String,
    /// Derived; kept as two-decimal text like the read-only field shows it.
    pub original_price: String,
    pub discount: String,
    pub one_time_discount: String,
    pub mode_of_payment: String,
    pub payment_mode_type: String,
    pub reference_number: String,
    pub mode_of_payment2: String,
    pub payment_mode_type2: String,
    pub reference_number2: String,
    pub amount2: String,
    pub released_bottle: String,
    pub released_blister: String,
    pub to_follow_bottle: String,
    pub to_follow_blister: String,
    pub remarks: String,
    pub received_by: String,
    pub collected_by: String,
}

impl Default for EncoderForm {
    fn default() -> Self {
        EncoderForm {
            location: DEFAULT_LOCATION.to_string(),
            date: String::new(),
            po_number: String::new(),
            member_name: String::new(),
            username: String::new(),
            new_member: false,
            member_type: String::new(),
            package_type: String::new(),
            to_blister: String::new(),
            quantity: String::new(),
            blister_count: String::new(),
            original_price: "0".to_string(),
            discount: "0".to_string(),
            one_time_discount: String::new(),
            mode_of_payment: String::new(),
            payment_mode_type: String::new(),
            reference_number: String::new(),
            mode_of_payment2: String::new(),
            payment_mode_type2: String::new(),
            reference_number2: String::new(),
            amount2: String::new(),
            released_bottle: String::new(),
            released_blister: String::new(),
            to_follow_bottle: String::new(),
            to_follow_blister: String::new(),
            remarks: String::new(),
            received_by: String::new(),
            collected_by: String::new(),
        }
    }
}

/// Everything one save writes: the entry and its optional children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleSubmission {
    pub entry: NewSaleEntry,
    pub payments: Vec<NewPayment>,
    pub inventory: Option<NewInventoryMovement>,
}

impl EncoderForm {
    /// A blank form with the default location.
    pub fn new() -> Self {
        Self::default()
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Location => &mut self.location,
            FormField::Date => &mut self.date,
            FormField::PoNumber => &mut self.po_number,
            FormField::MemberName => &mut self.member_name,
            FormField::Username => &mut self.username,
            FormField::MemberType => &mut self.member_type,
            FormField::PackageType => &mut self.package_type,
            FormField::ToBlister => &mut self.to_blister,
            FormField::Quantity => &mut self.quantity,
            FormField::BlisterCount => &mut self.blister_count,
            FormField::Discount => &mut self.discount,
            FormField::OneTimeDiscount => &mut self.one_time_discount,
            FormField::ModeOfPayment => &mut self.mode_of_payment,
            FormField::PaymentModeType => &mut self.payment_mode_type,
            FormField::ReferenceNumber => &mut self.reference_number,
            FormField::ModeOfPayment2 => &mut self.mode_of_payment2,
            FormField::PaymentModeType2 => &mut self.payment_mode_type2,
            FormField::ReferenceNumber2 => &mut self.reference_number2,
            FormField::Amount2 => &mut self.amount2,
            FormField::ReleasedBottle => &mut self.released_bottle,
            FormField::ReleasedBlister => &mut self.released_blister,
            FormField::ToFollowBottle => &mut self.to_follow_bottle,
            FormField::ToFollowBlister => &mut self.to_follow_blister,
            FormField::Remarks => &mut self.remarks,
            FormField::ReceivedBy => &mut self.received_by,
            FormField::CollectedBy => &mut self.collected_by,
        }
    }

    /// Sets one text field, recomputing the original price when the package,
    /// quantity or blister count changes.
    ///
    /// ## Example
    /// ```rust
    /// use salesdesk_core::encoder::{EncoderForm, FormField};
    ///
    /// let mut form = EncoderForm::new();
    /// form.update(FormField::PackageType, "Gold (3 bottles)");
    /// form.update(FormField::Quantity, "2");
    /// assert_eq!(form.original_price, "21000.00");
    /// ```
    pub fn update(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();

        if field.affects_original_price() {
            self.original_price = self
                .computed_original_price()
                .unwrap_or_default()
                .to_decimal_string();
        }
    }

    /// Toggles the new-member checkbox.
    pub fn set_new_member(&mut self, value: bool) {
        self.new_member = value;
    }

    /// Original price from the current package, quantity and blister count.
    pub fn computed_original_price(&self) -> Result<Money, ValidationError> {
        compute_original_price(
            &self.package_type,
            parse_count(&self.quantity),
            parse_count(&self.blister_count),
        )
    }

    /// Derived read-only price fields.
    pub fn pricing(&self) -> PricingSummary {
        compute_pricing(
            Money::parse_or_zero(&self.original_price),
            parse_discount_bps(&self.discount),
            Money::parse_or_zero(&self.one_time_discount),
        )
    }

    fn inventory_counts(&self) -> CoreResult<NewInventoryMovement> {
        Ok(NewInventoryMovement {
            released_bottle: parse_count_field("released_bottle", &self.released_bottle)?,
            released_blister: parse_count_field("released_blister", &self.released_blister)?,
            to_follow_bottle: parse_count_field("to_follow_bottle", &self.to_follow_bottle)?,
            to_follow_blister: parse_count_field("to_follow_blister", &self.to_follow_blister)?,
        })
    }

    /// Validates the form and builds what a save writes.
    ///
    /// ## Inclusion Rules
    /// - payment 1: a mode is chosen, or total sales > 0; amount = total sales
    /// - payment 2: a mode is chosen, or amount 2 > 0
    /// - inventory: any released / to-follow count > 0
    ///
    /// Counts must be whole numbers within range and the discount within
    /// 0-100%; anything else is a validation error.
    pub fn to_submission(&self, created_by: Option<&str>) -> CoreResult<SaleSubmission> {
        let quantity = parse_count_field("quantity", &self.quantity)?;
        let blister_count = parse_count_field("blister_count", &self.blister_count)?;
        let inventory = self.inventory_counts()?;
        let pricing = self.pricing();

        validate_discount_bps(pricing.discount_bps)?;
        validate_text("remarks", Some(&self.remarks))?;
        validate_text("member_name", Some(&self.member_name))?;
        let sale_date = parse_optional_date("sale_date", &self.date)?;

        let entry = NewSaleEntry {
            location: non_empty(&self.location).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            sale_date,
            po_number: non_empty(&self.po_number),
            member_name: non_empty(&self.member_name),
            username: non_empty(&self.username),
            is_new_member: self.new_member,
            member_type: non_empty(&self.member_type),
            package_type: non_empty(&self.package_type),
            to_blister: self.to_blister.trim().eq_ignore_ascii_case("yes"),
            quantity,
            blister_count,
            original_price: pricing.original_price,
            discount_bps: pricing.discount_bps,
            price_after_discount: pricing.price_after_discount,
            one_time_discount: pricing.one_time_discount,
            total_sales: pricing.total_sales,
            remarks: non_empty(&self.remarks),
            received_by: non_empty(&self.received_by),
            collected_by: non_empty(&self.collected_by),
            created_by: created_by.and_then(non_empty),
        };

        let mut payments = Vec::with_capacity(2);

        let mode1 = non_empty(&self.mode_of_payment);
        if mode1.is_some() || pricing.total_sales.is_positive() {
            payments.push(NewPayment {
                payment_no: 1,
                mode: mode1,
                mode_type: non_empty(&self.payment_mode_type),
                reference_no: non_empty(&self.reference_number),
                amount: pricing.total_sales,
            });
        }

        let mode2 = non_empty(&self.mode_of_payment2);
        let amount2 = Money::parse_or_zero(&self.amount2);
        if mode2.is_some() || amount2.is_positive() {
            payments.push(NewPayment {
                payment_no: 2,
                mode: mode2,
                mode_type: non_empty(&self.payment_mode_type2),
                reference_no: non_empty(&self.reference_number2),
                amount: amount2,
            });
        }

        Ok(SaleSubmission {
            entry,
            payments,
            inventory: inventory.has_data().then_some(inventory),
        })
    }

    /// Clears the form back to its initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
