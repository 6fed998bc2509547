//! Request extractors of the manage handlers.
//!
//! Same as axum's `Json`, `Path` and `Query`, but a rejected request is
//! answered with an `ErrorBody` like every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::shared::error::ApiError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
