use async_trait::async_trait;
use contracts::domain::a004_crypto_asset::aggregate::{
    CryptoAssetForm, CryptoAssetResource, CryptoAssetRow,
};
use contracts::domain::common::{EntityId, Status};
use contracts::shared::envelope::PageEnvelope;
use contracts::shared::paging::PageQuery;
use contracts::shared::validation::Validate;
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use super::repository;
use crate::manage::ManageService;
use crate::shared::error::ApiError;

pub struct CryptoAssetService;

/// A symbol may repeat across chains, never on the same chain
async fn check(db: &DatabaseConnection, form: &CryptoAssetForm) -> Result<(), ApiError> {
    form.validate().map_err(ApiError::Validation)?;

    let existing =
        repository::find_by_symbol_and_chain(db, form.symbol.trim(), form.chain.trim()).await?;
    if let Some(existing) = existing {
        if Some(existing.id) != form.id {
            return Err(ApiError::taken(
                "symbol",
                "This symbol already exists on the chain",
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl ManageService for CryptoAssetService {
    type Resource = CryptoAssetResource;

    async fn page(
        db: &DatabaseConnection,
        filters: &BTreeMap<String, String>,
        page: PageQuery,
    ) -> Result<PageEnvelope<CryptoAssetRow>, ApiError> {
        let (rows, total) = repository::find_page(db, filters, page).await?;
        Ok(PageEnvelope::new(rows, total))
    }

    async fn list_all(db: &DatabaseConnection) -> Result<Vec<CryptoAssetRow>, ApiError> {
        Ok(repository::list_all(db).await?)
    }

    async fn get(db: &DatabaseConnection, id: EntityId) -> Result<CryptoAssetRow, ApiError> {
        repository::get_by_id(db, id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Crypto asset #{}", id)))
    }

    async fn create(
        db: &DatabaseConnection,
        form: CryptoAssetForm,
    ) -> Result<CryptoAssetRow, ApiError> {
        check(db, &form).await?;
        Ok(repository::insert(db, &form).await?)
    }

    async fn update(
        db: &DatabaseConnection,
        form: CryptoAssetForm,
    ) -> Result<CryptoAssetRow, ApiError> {
        let id = form
            .id
            .ok_or_else(|| ApiError::BadRequest("id is required".to_string()))?;
        Self::get(db, id).await?;
        check(db, &form).await?;
        Ok(repository::update(db, id, &form).await?)
    }

    async fn change_status(
        db: &DatabaseConnection,
        id: EntityId,
        status: Status,
    ) -> Result<(), ApiError> {
        if !repository::set_status(db, id, status).await? {
            return Err(ApiError::not_found(format!("Crypto asset #{}", id)));
        }
        Ok(())
    }

    async fn delete(db: &DatabaseConnection, ids: &[EntityId]) -> Result<u64, ApiError> {
        Ok(repository::delete_many(db, ids).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::in_memory;

    fn usdt(chain: &str) -> CryptoAssetForm {
        CryptoAssetForm {
            symbol: "USDT".into(),
            name: "Tether".into(),
            chain: chain.into(),
            decimals: Some(6),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn symbol_is_unique_per_chain() {
        let db = in_memory().await.unwrap();
        CryptoAssetService::create(&db, usdt("Ethereum")).await.unwrap();
        CryptoAssetService::create(&db, usdt("Tron")).await.unwrap();

        let err = CryptoAssetService::create(&db, usdt("Tron")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[tokio::test]
    async fn chain_filter_and_status_filter() {
        let db = in_memory().await.unwrap();
        let eth = CryptoAssetService::create(&db, usdt("Ethereum")).await.unwrap();
        CryptoAssetService::create(&db, usdt("Tron")).await.unwrap();
        CryptoAssetService::change_status(&db, eth.id, Status::Disabled)
            .await
            .unwrap();

        let filters = BTreeMap::from([("chain".to_string(), "eth".to_string())]);
        let page = CryptoAssetService::page(&db, &filters, PageQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total_num, 1);
        assert_eq!(page.data[0].status, Status::Disabled);

        let filters = BTreeMap::from([("status".to_string(), "ENABLED".to_string())]);
        let page = CryptoAssetService::page(&db, &filters, PageQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total_num, 1);
        assert_eq!(page.data[0].chain, "Tron");

        let filters = BTreeMap::from([("status".to_string(), "ARCHIVED".to_string())]);
        let err = CryptoAssetService::page(&db, &filters, PageQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
