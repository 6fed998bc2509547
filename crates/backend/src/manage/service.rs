use async_trait::async_trait;
use contracts::domain::common::{EntityId, Resource, Status};
use contracts::shared::envelope::PageEnvelope;
use contracts::shared::paging::PageQuery;
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use crate::shared::error::ApiError;

pub type RowOf<S> = <<S as ManageService>::Resource as Resource>::Row;
pub type FormOf<S> = <<S as ManageService>::Resource as Resource>::Form;

/// Storage-side operations of one managed resource.
///
/// `filters` holds the non-empty, trimmed query parameters other than the
/// paging keys; services ignore keys they do not know.
#[async_trait]
pub trait ManageService: Send + Sync + 'static {
    type Resource: Resource;

    async fn page(
        db: &DatabaseConnection,
        filters: &BTreeMap<String, String>,
        page: PageQuery,
    ) -> Result<PageEnvelope<RowOf<Self>>, ApiError>;

    /// Every row, for selects
    async fn list_all(db: &DatabaseConnection) -> Result<Vec<RowOf<Self>>, ApiError>;

    async fn get(db: &DatabaseConnection, id: EntityId) -> Result<RowOf<Self>, ApiError>;

    async fn create(db: &DatabaseConnection, form: FormOf<Self>) -> Result<RowOf<Self>, ApiError>;

    async fn update(db: &DatabaseConnection, form: FormOf<Self>) -> Result<RowOf<Self>, ApiError>;

    async fn change_status(
        db: &DatabaseConnection,
        id: EntityId,
        status: Status,
    ) -> Result<(), ApiError>;

    /// Deletes the given ids and returns how many rows went away
    async fn delete(db: &DatabaseConnection, ids: &[EntityId]) -> Result<u64, ApiError>;
}
