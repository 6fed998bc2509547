use async_trait::async_trait;
use contracts::domain::a001_user::aggregate::{UserForm, UserResource, UserRow};
use contracts::domain::common::{EntityId, Status};
use contracts::shared::envelope::PageEnvelope;
use contracts::shared::paging::PageQuery;
use contracts::shared::validation::{FieldError, Validate};
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use super::repository;
use crate::domain::a002_role::repository as role_repository;
use crate::manage::ManageService;
use crate::shared::error::ApiError;

pub struct UserService;

/// Validation, unique username and an existing role
async fn check(db: &DatabaseConnection, form: &UserForm) -> Result<(), ApiError> {
    form.validate().map_err(ApiError::Validation)?;

    if let Some(existing) = repository::find_by_username(db, form.username.trim()).await? {
        if Some(existing.id) != form.id {
            return Err(ApiError::taken("username", "Username is already taken"));
        }
    }

    if let Some(role_id) = form.role_id {
        if role_repository::get_by_id(db, role_id).await?.is_none() {
            return Err(ApiError::Validation(vec![FieldError::new(
                "roleId",
                "Role does not exist",
            )]));
        }
    }
    Ok(())
}

#[async_trait]
impl ManageService for UserService {
    type Resource = UserResource;

    async fn page(
        db: &DatabaseConnection,
        filters: &BTreeMap<String, String>,
        page: PageQuery,
    ) -> Result<PageEnvelope<UserRow>, ApiError> {
        let (rows, total) = repository::find_page(db, filters, page).await?;
        Ok(PageEnvelope::new(rows, total))
    }

    async fn list_all(db: &DatabaseConnection) -> Result<Vec<UserRow>, ApiError> {
        Ok(repository::list_all(db).await?)
    }

    async fn get(db: &DatabaseConnection, id: EntityId) -> Result<UserRow, ApiError> {
        repository::get_by_id(db, id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("User #{}", id)))
    }

    async fn create(db: &DatabaseConnection, form: UserForm) -> Result<UserRow, ApiError> {
        check(db, &form).await?;
        Ok(repository::insert(db, &form).await?)
    }

    async fn update(db: &DatabaseConnection, form: UserForm) -> Result<UserRow, ApiError> {
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
            return Err(ApiError::not_found(format!("User #{}", id)));
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

    fn form(username: &str) -> UserForm {
        UserForm {
            username: username.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn username_must_be_unique() {
        let db = in_memory().await.unwrap();
        let alice = UserService::create(&db, form("alice")).await.unwrap();

        let err = UserService::create(&db, form("alice")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));

        // Saving a user under its own name is not a conflict
        let mut same = UserForm {
            id: Some(alice.id),
            nickname: "Al".into(),
            ..form("alice")
        };
        let updated = UserService::update(&db, same.clone()).await.unwrap();
        assert_eq!(updated.nickname.as_deref(), Some("Al"));
        assert_eq!(updated.created_at, alice.created_at);

        same.id = Some(alice.id + 100);
        assert!(matches!(
            UserService::update(&db, same).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let db = in_memory().await.unwrap();
        let err = UserService::create(
            &db,
            UserForm {
                role_id: Some(42),
                ..form("bob")
            },
        )
        .await
        .unwrap_err();

        match err {
            ApiError::Validation(errors) => assert_eq!(errors[0].field, "roleId"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_optionals_are_stored_as_null() {
        let db = in_memory().await.unwrap();
        let row = UserService::create(
            &db,
            UserForm {
                email: "  ".into(),
                phone: " +1 555 0100 ".into(),
                ..form("carol")
            },
        )
        .await
        .unwrap();
        assert_eq!(row.email, None);
        assert_eq!(row.phone.as_deref(), Some("+1 555 0100"));
        assert_eq!(row.status, Status::Enabled);
    }
}
