//! Query helpers shared by the resource repositories.

use contracts::domain::common::Status;
use contracts::shared::paging::{PageQuery, CURRENT_PAGE_KEY, PAGE_SIZE_KEY};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QuerySelect, Select,
};
use std::collections::BTreeMap;

use crate::shared::error::ApiError;

/// Splits raw page query parameters into paging and filters.
/// Blank filter values are dropped, the rest are trimmed.
pub fn split_params(params: &BTreeMap<String, String>) -> (PageQuery, BTreeMap<String, String>) {
    let page = PageQuery::from_params(params);
    let filters = params
        .iter()
        .filter(|(key, _)| key.as_str() != CURRENT_PAGE_KEY && key.as_str() != PAGE_SIZE_KEY)
        .filter_map(|(key, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| (key.clone(), value.to_string()))
        })
        .collect();
    (page, filters)
}

/// `column LIKE %value%` when `key` is present
pub fn text<E, C>(select: Select<E>, filters: &BTreeMap<String, String>, key: &str, column: C) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    match filters.get(key) {
        Some(value) => select.filter(column.contains(value.as_str())),
        None => select,
    }
}

/// `column = value` when `key` is present
pub fn exact<E, C>(select: Select<E>, filters: &BTreeMap<String, String>, key: &str, column: C) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    match filters.get(key) {
        Some(value) => select.filter(column.eq(value.as_str())),
        None => select,
    }
}

/// `status = ...` when the `status` filter is present; unknown values are a 400
pub fn status<E, C>(select: Select<E>, filters: &BTreeMap<String, String>, column: C) -> Result<Select<E>, ApiError>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    match filters.get("status") {
        None => Ok(select),
        Some(value) => {
            let status = Status::parse(value)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown status: {}", value)))?;
            Ok(select.filter(column.eq(status.as_str())))
        }
    }
}

/// Total count of the filtered select plus the models of the requested page
pub async fn fetch_page<E, D>(
    db: &D,
    select: Select<E>,
    page: PageQuery,
) -> Result<(Vec<E::Model>, u64), sea_orm::DbErr>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
    D: ConnectionTrait,
{
    let total = select.clone().count(db).await?;
    let models = select
        .offset(page.offset())
        .limit(page.page_size)
        .all(db)
        .await?;
    Ok((models, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_keys_are_not_filters() {
        let params: BTreeMap<String, String> = [
            ("currentPage", "2"),
            ("pageSize", "20"),
            ("code", "  usd "),
            ("name", "   "),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let (page, filters) = split_params(&params);
        assert_eq!(page, PageQuery::new(2, 20));
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get("code").map(String::as_str), Some("usd"));
    }
}
