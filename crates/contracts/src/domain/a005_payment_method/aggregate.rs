use serde::{Deserialize, Serialize};

use crate::domain::a003_currency::aggregate::is_iso_code;
use crate::domain::common::{EntityId, FilterField, Resource, Status};
use crate::shared::validation::{is_code, FieldError, Validate, Validator};

/// Deposit / withdrawal channel offered to customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodRow {
    pub id: EntityId,
    pub name: String,
    pub code: String,
    pub currency_code: String,
    /// Fraction of the amount, 0.015 = 1.5%
    pub fee_rate: f64,
    pub sort_order: i32,
    pub status: Status,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub fee_rate: Option<f64>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub status: Status,
}

impl Validate for PaymentMethodForm {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let code = self.code.trim();
        let currency_code = self.currency_code.trim();
        Validator::new()
            .required("name", &self.name, "Name is required")
            .max_len("name", &self.name, 64, "Name is too long")
            .required("code", code, "Code is required")
            .check("code", is_code(code), "Code may contain only A-Z, 0-9 and '_'")
            .max_len("code", code, 32, "Code is too long")
            .required("currencyCode", currency_code, "Currency is required")
            .check(
                "currencyCode",
                is_iso_code(currency_code),
                "Currency code must be 3 uppercase letters",
            )
            .required_value("feeRate", &self.fee_rate, "Fee rate is required")
            .range("feeRate", self.fee_rate, 0.0, 1.0, "Fee rate must be between 0 and 1")
            .required_value("sortOrder", &self.sort_order, "Sort order is required")
            .range("sortOrder", self.sort_order, 0, 9999, "Sort order must be between 0 and 9999")
            .finish()
    }
}

const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("name", "Name"),
    FilterField::text("currencyCode", "Currency"),
    FilterField::status(),
];

pub struct PaymentMethodResource;

impl Resource for PaymentMethodResource {
    type Row = PaymentMethodRow;
    type Form = PaymentMethodForm;

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "payment_method"
    }

    fn element_name() -> &'static str {
        "Payment method"
    }

    fn list_name() -> &'static str {
        "Payment methods"
    }

    fn filter_fields() -> &'static [FilterField] {
        FILTER_FIELDS
    }

    fn row_id(row: &PaymentMethodRow) -> EntityId {
        row.id
    }

    fn row_status(row: &PaymentMethodRow) -> Status {
        row.status
    }

    fn row_created_at(row: &PaymentMethodRow) -> &str {
        &row.created_at
    }

    fn row_updated_at(row: &PaymentMethodRow) -> &str {
        &row.updated_at
    }

    fn row_label(row: &PaymentMethodRow) -> String {
        row.name.clone()
    }

    fn form_from_row(row: &PaymentMethodRow) -> PaymentMethodForm {
        PaymentMethodForm {
            id: Some(row.id),
            name: row.name.clone(),
            code: row.code.clone(),
            currency_code: row.currency_code.clone(),
            fee_rate: Some(row.fee_rate),
            sort_order: Some(row.sort_order),
            status: row.status,
        }
    }

    fn form_id(form: &PaymentMethodForm) -> Option<EntityId> {
        form.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::message_for;

    #[test]
    fn every_missing_field_is_reported() {
        let errors = PaymentMethodForm::default().validate().unwrap_err();
        for field in ["name", "code", "currencyCode", "feeRate", "sortOrder"] {
            assert!(message_for(&errors, field).is_some(), "{field}");
        }
    }

    #[test]
    fn fee_rate_is_a_fraction() {
        let form = PaymentMethodForm {
            name: "Bank card".into(),
            code: "BANK_CARD".into(),
            currency_code: "USD".into(),
            fee_rate: Some(1.5),
            sort_order: Some(10),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            message_for(&errors, "feeRate"),
            Some("Fee rate must be between 0 and 1")
        );
        assert_eq!(PaymentMethodResource::route_segment(), "payment-method");
    }
}
