use axum::extract::State;
use axum::Json;
use contracts::domain::common::{EntityId, Resource};
use contracts::shared::envelope::{
    ChangeStatusRequest, DeleteResponse, IdListRequest, IdRequest, PageEnvelope,
};
use std::collections::BTreeMap;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::filters::split_params;
use super::service::{FormOf, ManageService, RowOf};
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

/// GET /manage/{r}/page?currentPage&pageSize&...filters
pub async fn page<S: ManageService>(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<BTreeMap<String, String>>,
) -> Result<Json<PageEnvelope<RowOf<S>>>, ApiError> {
    let (page, filters) = split_params(&params);
    Ok(Json(S::page(&state.db, &filters, page).await?))
}

/// GET /manage/{r}/list
pub async fn list<S: ManageService>(
    State(state): State<AppState>,
) -> Result<Json<Vec<RowOf<S>>>, ApiError> {
    Ok(Json(S::list_all(&state.db).await?))
}

/// GET /manage/{r}/detail/:id
pub async fn detail<S: ManageService>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<EntityId>,
) -> Result<Json<RowOf<S>>, ApiError> {
    Ok(Json(S::get(&state.db, id).await?))
}

/// POST /manage/{r}/create
pub async fn create<S: ManageService>(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<FormOf<S>>,
) -> Result<Json<RowOf<S>>, ApiError> {
    if <S::Resource as Resource>::form_id(&form).is_some() {
        return Err(ApiError::BadRequest(
            "A new record must not carry an id".to_string(),
        ));
    }
    let row = S::create(&state.db, form).await?;
    tracing::info!(
        "{}: created #{}",
        <S::Resource as Resource>::full_name(),
        <S::Resource as Resource>::row_id(&row)
    );
    Ok(Json(row))
}

/// POST /manage/{r}/update
pub async fn update<S: ManageService>(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<FormOf<S>>,
) -> Result<Json<RowOf<S>>, ApiError> {
    if <S::Resource as Resource>::form_id(&form).is_none() {
        return Err(ApiError::BadRequest("id is required".to_string()));
    }
    let row = S::update(&state.db, form).await?;
    tracing::info!(
        "{}: updated #{}",
        <S::Resource as Resource>::full_name(),
        <S::Resource as Resource>::row_id(&row)
    );
    Ok(Json(row))
}

/// POST /manage/{r}/change-status
pub async fn change_status<S: ManageService>(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChangeStatusRequest>,
) -> Result<Json<ChangeStatusRequest>, ApiError> {
    S::change_status(&state.db, request.id, request.status).await?;
    tracing::info!(
        "{}: #{} is now {}",
        <S::Resource as Resource>::full_name(),
        request.id,
        request.status
    );
    Ok(Json(request))
}

/// POST /manage/{r}/remove
pub async fn remove<S: ManageService>(
    State(state): State<AppState>,
    ApiJson(IdRequest { id }): ApiJson<IdRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = S::delete(&state.db, &[id]).await?;
    if deleted == 0 {
        return Err(ApiError::not_found(format!(
            "{} #{}",
            <S::Resource as Resource>::element_name(),
            id
        )));
    }
    tracing::info!("{}: removed #{}", <S::Resource as Resource>::full_name(), id);
    Ok(Json(DeleteResponse { deleted }))
}

/// POST /manage/{r}/delete-batch
///
/// Ids that do not exist are skipped; an empty list deletes nothing.
pub async fn delete_batch<S: ManageService>(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IdListRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if request.id_list.is_empty() {
        return Ok(Json(DeleteResponse { deleted: 0 }));
    }
    let deleted = S::delete(&state.db, &request.id_list).await?;
    tracing::info!(
        "{}: batch delete of {} id(s) removed {}",
        <S::Resource as Resource>::full_name(),
        request.id_list.len(),
        deleted
    );
    Ok(Json(DeleteResponse { deleted }))
}
