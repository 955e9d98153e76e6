//! # Options Commands
//!
//! Dropdown contents of the encoder and the current configuration.

use serde::Serialize;
use tracing::debug;

use crate::state::ConfigState;
use salesdesk_core::cash::{denomination_label, DENOMINATIONS};
use salesdesk_core::encoder::MEMBER_TYPE_OPTIONS;
use salesdesk_core::forms::FormType;
use salesdesk_core::payment::{SelectOption, PAYMENT_MODE_OPTIONS, PAYMENT_TYPE_OPTIONS};
use salesdesk_core::pricing::{PackageType, DISCOUNT_OPTIONS};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageOption {
    pub label: &'static str,
    pub unit_price_centavos: i64,
    pub bottles: i64,
    pub priced_by_blister_count: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenominationOption {
    pub centavos: i64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTypeOption {
    pub code: &'static str,
    pub example_reference: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub location: String,
    pub member_types: Vec<&'static str>,
    pub packages: Vec<PackageOption>,
    pub discount_percents: Vec<i64>,
    pub payment_modes: Vec<SelectOption>,
    pub payment_types: Vec<SelectOption>,
    pub denominations: Vec<DenominationOption>,
    pub form_types: Vec<FormTypeOption>,
}

/// Gets every option list the encoder offers.
pub fn get_options(config: &ConfigState) -> OptionsResponse {
    debug!("get_options command");

    OptionsResponse {
        location: config.location.clone(),
        member_types: MEMBER_TYPE_OPTIONS.to_vec(),
        packages: PackageType::ALL
            .iter()
            .map(|p| PackageOption {
                label: p.label(),
                unit_price_centavos: p.unit_price().centavos(),
                bottles: p.bottles(),
                priced_by_blister_count: p.priced_by_blister_count(),
            })
            .collect(),
        discount_percents: DISCOUNT_OPTIONS.to_vec(),
        payment_modes: PAYMENT_MODE_OPTIONS.to_vec(),
        payment_types: PAYMENT_TYPE_OPTIONS.to_vec(),
        denominations: DENOMINATIONS
            .iter()
            .map(|&centavos| DenominationOption {
                centavos,
                label: denomination_label(centavos),
            })
            .collect(),
        form_types: FormType::ALL
            .iter()
            .map(|t| FormTypeOption {
                code: t.code(),
                example_reference: t.reference_no(1),
            })
            .collect(),
    }
}

/// Gets the current application configuration.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_lists() {
        let options = get_options(&ConfigState::default());

        assert_eq!(options.location, "Davao Office");
        assert_eq!(options.member_types.len(), 5);
        assert_eq!(options.packages[1].label, "Gold (3 bottles)");
        assert_eq!(options.packages[1].unit_price_centavos, 1_050_000);
        assert!(options.packages[4].priced_by_blister_count);
        assert_eq!(options.discount_percents, vec![0, 5, 10, 15, 20]);
        assert_eq!(options.payment_modes[0].value, "cash");
        assert_eq!(options.denominations.last().unwrap().label, "₱0.25");
        assert_eq!(options.form_types[0].example_reference, "ER-000001");
    }

    #[test]
    fn test_options_serialize_camel_case() {
        let json = serde_json::to_value(get_options(&ConfigState::default())).unwrap();
        assert!(json.get("memberTypes").is_some());
        assert_eq!(json["packages"][0]["unitPriceCentavos"], 350_000);
    }
}
