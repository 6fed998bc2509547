use async_trait::async_trait;
use contracts::domain::a005_payment_method::aggregate::{
    PaymentMethodForm, PaymentMethodResource, PaymentMethodRow,
};
use contracts::domain::common::{EntityId, Status};
use contracts::shared::envelope::PageEnvelope;
use contracts::shared::paging::PageQuery;
use contracts::shared::validation::{FieldError, Validate};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use super::repository;
use crate::domain::a003_currency::repository as currency_repository;
use crate::manage::ManageService;
use crate::shared::error::ApiError;

pub struct PaymentMethodService;

async fn check(db: &DatabaseConnection, form: &PaymentMethodForm) -> Result<(), ApiError> {
    form.validate().map_err(ApiError::Validation)?;

    if let Some(existing) = repository::find_by_code(db, form.code.trim()).await? {
        if Some(existing.id) != form.id {
            return Err(ApiError::taken("code", "Payment method code already exists"));
        }
    }

    if currency_repository::find_by_code(db, form.currency_code.trim())
        .await?
        .is_none()
    {
        return Err(ApiError::Validation(vec![FieldError::new(
            "currencyCode",
            "Currency does not exist",
        )]));
    }
    Ok(())
}

#[async_trait]
impl ManageService for PaymentMethodService {
    type Resource = PaymentMethodResource;

    async fn page(
        db: &DatabaseConnection,
        filters: &BTreeMap<String, String>,
        page: PageQuery,
    ) -> Result<PageEnvelope<PaymentMethodRow>, ApiError> {
        let (rows, total) = repository::find_page(db, filters, page).await?;
        Ok(PageEnvelope::new(rows, total))
    }

    async fn list_all(db: &DatabaseConnection) -> Result<Vec<PaymentMethodRow>, ApiError> {
        Ok(repository::list_all(db).await?)
    }

    async fn get(db: &DatabaseConnection, id: EntityId) -> Result<PaymentMethodRow, ApiError> {
        repository::get_by_id(db, id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Payment method #{}", id)))
    }

    async fn create(
        db: &DatabaseConnection,
        form: PaymentMethodForm,
    ) -> Result<PaymentMethodRow, ApiError> {
        check(db, &form).await?;
        Ok(repository::insert(db, &form).await?)
    }

    async fn update(
        db: &DatabaseConnection,
        form: PaymentMethodForm,
    ) -> Result<PaymentMethodRow, ApiError> {
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
            return Err(ApiError::not_found(format!("Payment method #{}", id)));
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
    use crate::domain::a003_currency::service::CurrencyService;
    use crate::shared::data::db::in_memory;
    use contracts::domain::a003_currency::aggregate::CurrencyForm;

    fn card(code: &str, sort_order: i32) -> PaymentMethodForm {
        PaymentMethodForm {
            name: format!("Method {}", code),
            code: code.into(),
            currency_code: "EUR".into(),
            fee_rate: Some(0.01),
            sort_order: Some(sort_order),
            ..Default::default()
        }
    }

    async fn with_eur() -> DatabaseConnection {
        let db = in_memory().await.unwrap();
        CurrencyService::create(
            &db,
            CurrencyForm {
                code: "EUR".into(),
                name: "Euro".into(),
                symbol: "€".into(),
                precision: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        db
    }

    #[tokio::test]
    async fn currency_must_exist() {
        let db = in_memory().await.unwrap();
        let err = PaymentMethodService::create(&db, card("SEPA", 1))
            .await
            .unwrap_err();
        assert_eq!(err.body().field_errors[0].field, "currencyCode");
    }

    #[tokio::test]
    async fn pages_follow_sort_order() {
        let db = with_eur().await;
        PaymentMethodService::create(&db, card("LATE", 30)).await.unwrap();
        PaymentMethodService::create(&db, card("FIRST", 10)).await.unwrap();
        PaymentMethodService::create(&db, card("MIDDLE", 20)).await.unwrap();

        let page = PaymentMethodService::page(&db, &BTreeMap::new(), PageQuery::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.total_num, 3);
        let codes: Vec<_> = page.data.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["FIRST", "MIDDLE"]);
    }

    #[tokio::test]
    async fn used_currency_cannot_be_deleted() {
        let db = with_eur().await;
        PaymentMethodService::create(&db, card("SEPA", 1)).await.unwrap();
        let eur = CurrencyService::list_all(&db).await.unwrap().remove(0);

        let err = CurrencyService::delete(&db, &[eur.id]).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }
}
