use async_trait::async_trait;
use contracts::domain::a002_role::aggregate::{RoleForm, RoleResource, RoleRow};
use contracts::domain::common::{EntityId, Status};
use contracts::shared::envelope::PageEnvelope;
use contracts::shared::paging::PageQuery;
use contracts::shared::validation::Validate;
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use super::repository;
use crate::domain::a001_user::repository as user_repository;
use crate::manage::ManageService;
use crate::shared::error::ApiError;

pub struct RoleService;

async fn check(db: &DatabaseConnection, form: &RoleForm) -> Result<(), ApiError> {
    form.validate().map_err(ApiError::Validation)?;

    if let Some(existing) = repository::find_by_code(db, form.code.trim()).await? {
        if Some(existing.id) != form.id {
            return Err(ApiError::taken("code", "Role code already exists"));
        }
    }
    Ok(())
}

#[async_trait]
impl ManageService for RoleService {
    type Resource = RoleResource;

    async fn page(
        db: &DatabaseConnection,
        filters: &BTreeMap<String, String>,
        page: PageQuery,
    ) -> Result<PageEnvelope<RoleRow>, ApiError> {
        let (rows, total) = repository::find_page(db, filters, page).await?;
        Ok(PageEnvelope::new(rows, total))
    }

    async fn list_all(db: &DatabaseConnection) -> Result<Vec<RoleRow>, ApiError> {
        Ok(repository::list_all(db).await?)
    }

    async fn get(db: &DatabaseConnection, id: EntityId) -> Result<RoleRow, ApiError> {
        repository::get_by_id(db, id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Role #{}", id)))
    }

    async fn create(db: &DatabaseConnection, form: RoleForm) -> Result<RoleRow, ApiError> {
        check(db, &form).await?;
        Ok(repository::insert(db, &form).await?)
    }

    async fn update(db: &DatabaseConnection, form: RoleForm) -> Result<RoleRow, ApiError> {
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
            return Err(ApiError::not_found(format!("Role #{}", id)));
        }
        Ok(())
    }

    /// Roles still assigned to users are not deleted
    async fn delete(db: &DatabaseConnection, ids: &[EntityId]) -> Result<u64, ApiError> {
        let in_use = user_repository::count_with_roles(db, ids).await?;
        if in_use > 0 {
            return Err(ApiError::conflict(format!(
                "Role is assigned to {} user(s)",
                in_use
            )));
        }
        Ok(repository::delete_many(db, ids).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_user::service::UserService;
    use crate::shared::data::db::in_memory;
    use contracts::domain::a001_user::aggregate::UserForm;

    fn role(code: &str) -> RoleForm {
        RoleForm {
            name: format!("{} role", code),
            code: code.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn code_must_be_unique() {
        let db = in_memory().await.unwrap();
        RoleService::create(&db, role("ADMIN")).await.unwrap();

        let err = RoleService::create(&db, role("ADMIN")).await.unwrap_err();
        assert_eq!(err.body().field_errors[0].field, "code");
    }

    #[tokio::test]
    async fn assigned_role_cannot_be_deleted() {
        let db = in_memory().await.unwrap();
        let admin = RoleService::create(&db, role("ADMIN")).await.unwrap();
        let viewer = RoleService::create(&db, role("VIEWER")).await.unwrap();
        UserService::create(
            &db,
            UserForm {
                username: "root".into(),
                role_id: Some(admin.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = RoleService::delete(&db, &[admin.id, viewer.id]).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { field: None, .. }));
        // Nothing was removed
        assert_eq!(RoleService::list_all(&db).await.unwrap().len(), 2);

        assert_eq!(RoleService::delete(&db, &[viewer.id]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn status_change_of_missing_role() {
        let db = in_memory().await.unwrap();
        let err = RoleService::change_status(&db, 9, Status::Disabled)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
