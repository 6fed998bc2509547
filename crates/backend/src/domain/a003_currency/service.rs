use async_trait::async_trait;
use contracts::domain::a003_currency::aggregate::{CurrencyForm, CurrencyResource, CurrencyRow};
use contracts::domain::common::{EntityId, Status};
use contracts::shared::envelope::PageEnvelope;
use contracts::shared::paging::PageQuery;
use contracts::shared::validation::Validate;
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use super::repository;
use crate::domain::a005_payment_method::repository as payment_repository;
use crate::manage::ManageService;
use crate::shared::error::ApiError;

pub struct CurrencyService;

async fn check(db: &DatabaseConnection, form: &CurrencyForm) -> Result<(), ApiError> {
    form.validate().map_err(ApiError::Validation)?;

    if let Some(existing) = repository::find_by_code(db, form.code.trim()).await? {
        if Some(existing.id) != form.id {
            return Err(ApiError::taken("code", "Currency code already exists"));
        }
    }
    Ok(())
}

#[async_trait]
impl ManageService for CurrencyService {
    type Resource = CurrencyResource;

    async fn page(
        db: &DatabaseConnection,
        filters: &BTreeMap<String, String>,
        page: PageQuery,
    ) -> Result<PageEnvelope<CurrencyRow>, ApiError> {
        let (rows, total) = repository::find_page(db, filters, page).await?;
        Ok(PageEnvelope::new(rows, total))
    }

    async fn list_all(db: &DatabaseConnection) -> Result<Vec<CurrencyRow>, ApiError> {
        Ok(repository::list_all(db).await?)
    }

    async fn get(db: &DatabaseConnection, id: EntityId) -> Result<CurrencyRow, ApiError> {
        repository::get_by_id(db, id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Currency #{}", id)))
    }

    async fn create(db: &DatabaseConnection, form: CurrencyForm) -> Result<CurrencyRow, ApiError> {
        check(db, &form).await?;
        Ok(repository::insert(db, &form).await?)
    }

    /// The code of a currency used by payment methods is frozen
    async fn update(db: &DatabaseConnection, form: CurrencyForm) -> Result<CurrencyRow, ApiError> {
        let id = form
            .id
            .ok_or_else(|| ApiError::BadRequest("id is required".to_string()))?;
        let current = Self::get(db, id).await?;
        check(db, &form).await?;

        if current.code != form.code.trim() {
            let in_use = payment_repository::count_with_currencies(db, &[current.code]).await?;
            if in_use > 0 {
                return Err(ApiError::taken(
                    "code",
                    "Code of a currency used by payment methods cannot change",
                ));
            }
        }
        Ok(repository::update(db, id, &form).await?)
    }

    async fn change_status(
        db: &DatabaseConnection,
        id: EntityId,
        status: Status,
    ) -> Result<(), ApiError> {
        if !repository::set_status(db, id, status).await? {
            return Err(ApiError::not_found(format!("Currency #{}", id)));
        }
        Ok(())
    }

    async fn delete(db: &DatabaseConnection, ids: &[EntityId]) -> Result<u64, ApiError> {
        let codes = repository::codes_of(db, ids).await?;
        let in_use = payment_repository::count_with_currencies(db, &codes).await?;
        if in_use > 0 {
            return Err(ApiError::conflict(format!(
                "Currency is used by {} payment method(s)",
                in_use
            )));
        }
        Ok(repository::delete_many(db, ids).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::in_memory;

    fn usd() -> CurrencyForm {
        CurrencyForm {
            code: "USD".into(),
            name: "US dollar".into(),
            symbol: "$".into(),
            precision: Some(2),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_and_page() {
        let db = in_memory().await.unwrap();
        let row = CurrencyService::create(&db, usd()).await.unwrap();
        assert_eq!(row.precision, 2);
        assert_eq!(row.created_at, row.updated_at);

        let page = CurrencyService::page(&db, &BTreeMap::new(), PageQuery::default())
            .await
            .unwrap();
        assert_eq!(page.total_num, 1);
        assert_eq!(page.data[0].code, "USD");
    }

    #[tokio::test]
    async fn precision_out_of_range() {
        let db = in_memory().await.unwrap();
        let err = CurrencyService::create(
            &db,
            CurrencyForm {
                precision: Some(12),
                ..usd()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.body().field_errors[0].field, "precision");
    }
}
