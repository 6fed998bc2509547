use axum::routing::{get, post};
use axum::Router;
use contracts::domain::common::{Endpoint, Resource};

use super::handlers;
use super::service::ManageService;
use crate::shared::state::AppState;

/// Every operation of one resource, relative to its base path
pub fn resource_routes<S: ManageService>() -> Router<AppState> {
    Router::new()
        .route(&Endpoint::Page.path(), get(handlers::page::<S>))
        .route(&Endpoint::List.path(), get(handlers::list::<S>))
        .route("/detail/:id", get(handlers::detail::<S>))
        .route(&Endpoint::Create.path(), post(handlers::create::<S>))
        .route(&Endpoint::Update.path(), post(handlers::update::<S>))
        .route(&Endpoint::ChangeStatus.path(), post(handlers::change_status::<S>))
        .route(&Endpoint::Remove.path(), post(handlers::remove::<S>))
        .route(&Endpoint::DeleteBatch.path(), post(handlers::delete_batch::<S>))
}

/// Adds the routes of `S` under `/manage/{route_segment}`
pub fn nest<S: ManageService>(router: Router<AppState>) -> Router<AppState> {
    router.nest(&<S::Resource as Resource>::base_path(), resource_routes::<S>())
}
