use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::shared::error::ApiError;
use crate::shared::state::AppState;

/// `Authorization: Bearer <token>` value of a request, if any
pub fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Middleware that requires one of the configured bearer tokens
pub async fn require_token(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or(ApiError::Unauthorized)?;
    if !state.config.auth.accepts(token) {
        tracing::warn!("Rejected token for {} {}", req.method(), req.uri().path());
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(req).await)
}
