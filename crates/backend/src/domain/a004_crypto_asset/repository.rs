use contracts::domain::a004_crypto_asset::aggregate::{CryptoAssetForm, CryptoAssetRow};
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
#[sea_orm(table_name = "a004_crypto_asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub symbol: String,
    pub name: String,
    pub chain: String,
    pub contract_address: Option<String>,
    pub decimals: i32,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CryptoAssetRow {
    fn from(m: Model) -> Self {
        CryptoAssetRow {
            id: m.id,
            symbol: m.symbol,
            name: m.name,
            chain: m.chain,
            contract_address: m.contract_address,
            decimals: m.decimals.clamp(0, u8::MAX as i32) as u8,
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
) -> Result<(Vec<CryptoAssetRow>, u64), ApiError> {
    let mut select = Entity::find();
    select = filters::text(select, params, "symbol", Column::Symbol);
    select = filters::text(select, params, "name", Column::Name);
    select = filters::text(select, params, "chain", Column::Chain);
    select = filters::status(select, params, Column::Status)?;

    let (models, total) =
        filters::fetch_page(db, select.order_by_desc(Column::Id), page).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<CryptoAssetRow>, DbErr> {
    let models = Entity::find()
        .order_by_asc(Column::Symbol)
        .order_by_asc(Column::Chain)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(
    db: &DatabaseConnection,
    id: EntityId,
) -> Result<Option<CryptoAssetRow>, DbErr> {
    Ok(Entity::find_by_id(id).one(db).await?.map(Into::into))
}

pub async fn find_by_symbol_and_chain(
    db: &DatabaseConnection,
    symbol: &str,
    chain: &str,
) -> Result<Option<CryptoAssetRow>, DbErr> {
    let model = Entity::find()
        .filter(Column::Symbol.eq(symbol))
        .filter(Column::Chain.eq(chain))
        .one(db)
        .await?;
    Ok(model.map(Into::into))
}

fn write_model(form: &CryptoAssetForm) -> ActiveModel {
    ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        symbol: Set(form.symbol.trim().to_string()),
        name: Set(form.name.trim().to_string()),
        chain: Set(form.chain.trim().to_string()),
        contract_address: Set(form.contract_address()),
        decimals: Set(form.decimals.unwrap_or(18) as i32),
        status: Set(form.status.as_str().to_string()),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(timestamp_now()),
    }
}

pub async fn insert(db: &DatabaseConnection, form: &CryptoAssetForm) -> Result<CryptoAssetRow, DbErr> {
    let mut active = write_model(form);
    active.created_at = Set(timestamp_now());
    active.updated_at = active.created_at.clone();
    Ok(active.insert(db).await?.into())
}

pub async fn update(
    db: &DatabaseConnection,
    id: EntityId,
    form: &CryptoAssetForm,
) -> Result<CryptoAssetRow, DbErr> {
    let mut active = write_model(form);
    active.id = Set(id);
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
