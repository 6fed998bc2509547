use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, FilterField, Resource, Status};
use crate::shared::validation::{is_code, non_blank, FieldError, Validate, Validator};

/// Token or coin on a specific chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoAssetRow {
    pub id: EntityId,
    pub symbol: String,
    pub name: String,
    pub chain: String,
    pub contract_address: Option<String>,
    pub decimals: u8,
    pub status: Status,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoAssetForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub status: Status,
}

impl CryptoAssetForm {
    pub fn contract_address(&self) -> Option<String> {
        non_blank(&self.contract_address)
    }
}

impl Validate for CryptoAssetForm {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let symbol = self.symbol.trim();
        Validator::new()
            .required("symbol", symbol, "Symbol is required")
            .check("symbol", is_code(symbol), "Symbol may contain only A-Z, 0-9 and '_'")
            .max_len("symbol", symbol, 16, "Symbol is too long")
            .required("name", &self.name, "Name is required")
            .max_len("name", &self.name, 64, "Name is too long")
            .required("chain", &self.chain, "Chain is required")
            .max_len("chain", &self.chain, 32, "Chain is too long")
            .max_len(
                "contractAddress",
                &self.contract_address,
                128,
                "Contract address is too long",
            )
            .required_value("decimals", &self.decimals, "Decimals are required")
            .range("decimals", self.decimals, 0, 36, "Decimals must be between 0 and 36")
            .finish()
    }
}

const FILTER_FIELDS: &[FilterField] = &[
    FilterField::text("symbol", "Symbol"),
    FilterField::text("chain", "Chain"),
    FilterField::status(),
];

pub struct CryptoAssetResource;

impl Resource for CryptoAssetResource {
    type Row = CryptoAssetRow;
    type Form = CryptoAssetForm;

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "crypto_asset"
    }

    fn element_name() -> &'static str {
        "Crypto asset"
    }

    fn list_name() -> &'static str {
        "Crypto assets"
    }

    fn filter_fields() -> &'static [FilterField] {
        FILTER_FIELDS
    }

    fn row_id(row: &CryptoAssetRow) -> EntityId {
        row.id
    }

    fn row_status(row: &CryptoAssetRow) -> Status {
        row.status
    }

    fn row_created_at(row: &CryptoAssetRow) -> &str {
        &row.created_at
    }

    fn row_updated_at(row: &CryptoAssetRow) -> &str {
        &row.updated_at
    }

    fn row_label(row: &CryptoAssetRow) -> String {
        format!("{} @ {}", row.symbol, row.chain)
    }

    fn form_from_row(row: &CryptoAssetRow) -> CryptoAssetForm {
        CryptoAssetForm {
            id: Some(row.id),
            symbol: row.symbol.clone(),
            name: row.name.clone(),
            chain: row.chain.clone(),
            contract_address: row.contract_address.clone().unwrap_or_default(),
            decimals: Some(row.decimals),
            status: row.status,
        }
    }

    fn form_id(form: &CryptoAssetForm) -> Option<EntityId> {
        form.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::Endpoint;
    use crate::shared::validation::message_for;

    #[test]
    fn route_segment_uses_dashes() {
        assert_eq!(CryptoAssetResource::full_name(), "a004_crypto_asset");
        assert_eq!(CryptoAssetResource::route_segment(), "crypto-asset");
        assert_eq!(
            CryptoAssetResource::endpoint(Endpoint::DeleteBatch),
            "/manage/crypto-asset/delete-batch"
        );
    }

    #[test]
    fn decimals_out_of_range() {
        let form = CryptoAssetForm {
            symbol: "USDT".into(),
            name: "Tether".into(),
            chain: "TRON".into(),
            decimals: Some(40),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            message_for(&errors, "decimals"),
            Some("Decimals must be between 0 and 36")
        );
        assert_eq!(form.contract_address(), None);
    }
}
