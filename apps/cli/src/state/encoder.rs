//! # Encoder State
//!
//! Holds the encoder form being filled in.
//!
//! ## Form Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator Action          Command                 Form State Change     │
//! │  ───────────────          ───────                 ─────────────────     │
//! │                                                                         │
//! │  --package gold ─────────► update_field() ──────► package_type, price  │
//! │                                                                         │
//! │  --new-member ───────────► set_new_member() ────► new_member = true    │
//! │                                                                         │
//! │  (read totals) ──────────► preview_pricing() ───► (read only)          │
//! │                                                                         │
//! │  save ───────────────────► save_entry() ────────► reset on success     │
//! │                                                                         │
//! │  clear ──────────────────► clear_form() ────────► reset                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use salesdesk_core::encoder::EncoderForm;

/// Shared encoder form.
///
/// `Arc<Mutex<_>>` so the form can be handed to concurrent commands; every
/// edit is short, so a plain `Mutex` is enough.
#[derive(Debug, Clone)]
pub struct EncoderState {
    form: Arc<Mutex<EncoderForm>>,
}

impl EncoderState {
    /// Creates a blank form stamped with `location`.
    pub fn new(location: &str) -> Self {
        let mut form = EncoderForm::new();
        form.location = location.to_string();
        EncoderState {
            form: Arc::new(Mutex::new(form)),
        }
    }

    /// Executes a function with read access to the form.
    pub fn with_form<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&EncoderForm) -> R,
    {
        // A panic mid-edit leaves plain strings behind, still usable
        let form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        f(&form)
    }

    /// Executes a function with write access to the form.
    pub fn with_form_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut EncoderForm) -> R,
    {
        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut form)
    }

    /// Resets the form, keeping its location.
    pub fn reset(&self) {
        self.with_form_mut(|form| {
            let location = std::mem::take(&mut form.location);
            form.reset();
            form.location = location;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdesk_core::encoder::FormField;

    #[test]
    fn test_new_form_uses_location() {
        let state = EncoderState::new("Cebu Office");
        assert_eq!(state.with_form(|f| f.location.clone()), "Cebu Office");
    }

    #[test]
    fn test_reset_keeps_location() {
        let state = EncoderState::new("Cebu Office");
        state.with_form_mut(|f| {
            f.update(FormField::PackageType, "Gold (3 bottles)");
            f.update(FormField::Quantity, "1");
        });
        assert_eq!(state.with_form(|f| f.original_price.clone()), "10500.00");

        state.reset();
        state.with_form(|f| {
            assert_eq!(f.location, "Cebu Office");
            assert!(f.package_type.is_empty());
            assert_eq!(f.original_price, "0");
        });
    }

    #[test]
    fn test_clones_share_the_form() {
        let state = EncoderState::new("Davao Office");
        let other = state.clone();
        other.with_form_mut(|f| f.set_new_member(true));
        assert!(state.with_form(|f| f.new_member));
    }
}
