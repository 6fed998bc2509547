use contracts::domain::a001_user::aggregate::{UserForm, UserRow};
use contracts::domain::common::{EntityId, Status};
use contracts::shared::paging::PageQuery;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set};
use std::collections::BTreeMap;

use crate::manage::filters;
use crate::shared::error::ApiError;
use crate::shared::format::timestamp_now;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role_id: Option<i64>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserRow {
    fn from(m: Model) -> Self {
        UserRow {
            id: m.id,
            username: m.username,
            nickname: m.nickname,
            email: m.email,
            phone: m.phone,
            role_id: m.role_id,
            status: Status::parse(&m.status).unwrap_or_default(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Filters: `username`, `email`, `nickname` (contains), `roleId`, `status`
pub async fn find_page(
    db: &DatabaseConnection,
    params: &BTreeMap<String, String>,
    page: PageQuery,
) -> Result<(Vec<UserRow>, u64), ApiError> {
    let mut select = Entity::find();
    select = filters::text(select, params, "username", Column::Username);
    select = filters::text(select, params, "nickname", Column::Nickname);
    select = filters::text(select, params, "email", Column::Email);
    select = filters::exact(select, params, "roleId", Column::RoleId);
    select = filters::status(select, params, Column::Status)?;

    let (models, total) =
        filters::fetch_page(db, select.order_by_desc(Column::Id), page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<UserRow>, DbErr> {
    let models = Entity::find()
        .order_by_asc(Column::Username)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(db: &DatabaseConnection, id: EntityId) -> Result<Option<UserRow>, DbErr> {
    Ok(Entity::find_by_id(id).one(db).await?.map(Into::into))
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<UserRow>, DbErr> {
    let model = Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await?;
    Ok(model.map(Into::into))
}

/// Number of users holding any of the given roles
pub async fn count_with_roles(db: &DatabaseConnection, role_ids: &[EntityId]) -> Result<u64, DbErr> {
    Entity::find()
        .filter(Column::RoleId.is_in(role_ids.iter().copied()))
        .count(db)
        .await
}

pub async fn insert(db: &DatabaseConnection, form: &UserForm) -> Result<UserRow, DbErr> {
    let now = timestamp_now();
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        username: Set(form.username.trim().to_string()),
        nickname: Set(form.nickname()),
        email: Set(form.email()),
        phone: Set(form.phone()),
        role_id: Set(form.role_id),
        status: Set(form.status.as_str().to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    Ok(active.insert(db).await?.into())
}

pub async fn update(db: &DatabaseConnection, id: EntityId, form: &UserForm) -> Result<UserRow, DbErr> {
    let active = ActiveModel {
        id: Set(id),
        username: Set(form.username.trim().to_string()),
        nickname: Set(form.nickname()),
        email: Set(form.email()),
        phone: Set(form.phone()),
        role_id: Set(form.role_id),
        status: Set(form.status.as_str().to_string()),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(timestamp_now()),
    };
    Ok(active.update(db).await?.into())
}

/// Returns `false` when no such user exists
pub async fn set_status(db: &DatabaseConnection, id: EntityId, status: Status) -> Result<bool, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.as_str()))
        .col_expr(Column::UpdatedAt, Expr::value(timestamp_now()))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn delete_many(db: &DatabaseConnection, ids: &[EntityId]) -> Result<u64, DbErr> {
    let result = Entity::delete_many()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
