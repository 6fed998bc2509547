use contracts::domain::a002_role::aggregate::{RoleForm, RoleRow};
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
#[sea_orm(table_name = "a002_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RoleRow {
    fn from(m: Model) -> Self {
        RoleRow {
            id: m.id,
            name: m.name,
            code: m.code,
            description: m.description,
            status: Status::parse(&m.status).unwrap_or_default(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub async fn find_page(
    db: &DatabaseConnection,
    params: &BTreeMap<String, String>,
    page: PageQuery,
) -> Result<(Vec<RoleRow>, u64), ApiError> {
    let mut select = Entity::find();
    select = filters::text(select, params, "name", Column::Name);
    select = filters::text(select, params, "code", Column::Code);
    select = filters::status(select, params, Column::Status)?;

    let (models, total) =
        filters::fetch_page(db, select.order_by_desc(Column::Id), page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<RoleRow>, DbErr> {
    let models = Entity::find().order_by_asc(Column::Name).all(db).await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(db: &DatabaseConnection, id: EntityId) -> Result<Option<RoleRow>, DbErr> {
    Ok(Entity::find_by_id(id).one(db).await?.map(Into::into))
}

pub async fn find_by_code(db: &DatabaseConnection, code: &str) -> Result<Option<RoleRow>, DbErr> {
    let model = Entity::find().filter(Column::Code.eq(code)).one(db).await?;
    Ok(model.map(Into::into))
}

pub async fn insert(db: &DatabaseConnection, form: &RoleForm) -> Result<RoleRow, DbErr> {
    let now = timestamp_now();
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set(form.name.trim().to_string()),
        code: Set(form.code.trim().to_string()),
        description: Set(form.description()),
        status: Set(form.status.as_str().to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    Ok(active.insert(db).await?.into())
}

pub async fn update(db: &DatabaseConnection, id: EntityId, form: &RoleForm) -> Result<RoleRow, DbErr> {
    let active = ActiveModel {
        id: Set(id),
        name: Set(form.name.trim().to_string()),
        code: Set(form.code.trim().to_string()),
        description: Set(form.description()),
        status: Set(form.status.as_str().to_string()),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(timestamp_now()),
    };
    Ok(active.update(db).await?.into())
}

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
