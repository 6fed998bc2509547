use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, FilterField, Resource, Status};
use crate::shared::validation::{FieldError, Validate, Validator};

/// Fiat currency (ISO 4217)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRow {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub precision: u8,
    pub status: Status,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub precision: Option<u8>,
    #[serde(default)]
    pub status: Status,
}

/// Three uppercase latin letters
pub fn is_iso_code(value: &str) -> bool {
    value.len() == 3 && value.chars().all(|c| c.is_ascii_uppercase())
}

impl Validate for CurrencyForm {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let code = self.code.trim();
        Validator::new()
            .required("code", code, "Code is required")
            .check("code", is_iso_code(code), "Code must be 3 uppercase letters")
            .required("name", &self.name, "Name is required")
            .max_len("name", &self.name, 64, "Name is too long")
            .required("symbol", &self.symbol, "Symbol is required")
            .max_len("symbol", &self.symbol, 8, "Symbol is too long")
            .required_value("precision", &self.precision, "Precision is required")
            .range("precision", self.precision, 0, 8, "Precision must be between 0 and 8")
            .finish()
    }
}

const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("code", "Code"),
    FilterField::text("name", "Name"),
    FilterField::status(),
];

pub struct CurrencyResource;

impl Resource for CurrencyResource {
    type Row = CurrencyRow;
    type Form = CurrencyForm;

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "currency"
    }

    fn element_name() -> &'static str {
        "Currency"
    }

    fn list_name() -> &'static str {
        "Currencies"
    }

    fn filter_fields() -> &'static [FilterField] {
        FILTER_FIELDS
    }

    fn row_id(row: &CurrencyRow) -> EntityId {
        row.id
    }

    fn row_status(row: &CurrencyRow) -> Status {
        row.status
    }

    fn row_created_at(row: &CurrencyRow) -> &str {
        &row.created_at
    }

    fn row_updated_at(row: &CurrencyRow) -> &str {
        &row.updated_at
    }

    fn row_label(row: &CurrencyRow) -> String {
        row.code.clone()
    }

    fn form_from_row(row: &CurrencyRow) -> CurrencyForm {
        CurrencyForm {
            id: Some(row.id),
            code: row.code.clone(),
            name: row.name.clone(),
            symbol: row.symbol.clone(),
            precision: Some(row.precision),
            status: row.status,
        }
    }

    fn form_id(form: &CurrencyForm) -> Option<EntityId> {
        form.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::message_for;

    #[test]
    fn precision_is_required() {
        let form = CurrencyForm {
            code: "USD".into(),
            name: "US Dollar".into(),
            symbol: "$".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(message_for(&errors, "precision"), Some("Precision is required"));

        let form = CurrencyForm {
            precision: Some(2),
            ..form
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_fields_read_as_empty_and_fail_validation() {
        let form: CurrencyForm =
            serde_json::from_str(r#"{"code":"USD","symbol":"$","precision":2}"#).unwrap();
        assert_eq!(form.name, "");
        let errors = form.validate().unwrap_err();
        assert_eq!(message_for(&errors, "name"), Some("Name is required"));
    }

    #[test]
    fn iso_code_shape() {
        assert!(is_iso_code("EUR"));
        assert!(!is_iso_code("eur"));
        assert!(!is_iso_code("EURO"));
    }
}
