//! HTTP client for the `/manage` API.
//!
//! Every request carries `Authorization: Bearer <token>` read from
//! localStorage. Failures are logged and surfaced as an error toast here, so
//! callers only decide what to do with the `Err`. A 401 also clears the token,
//! which sends the operator back to the token page.

use contracts::shared::envelope::ErrorBody;
use contracts::shared::validation::FieldError;
use gloo_net::http::{Request, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::future::Future;

use crate::layout::toast_service::ToastService;
use crate::shared::api_utils::api_url;
use crate::system::auth::context::{sign_out, AuthState};
use crate::system::auth::storage;

/// Status used for failures that never produced an HTTP response
pub const STATUS_NETWORK: u16 = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub field_errors: Vec<FieldError>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(STATUS_NETWORK, message)
    }

    pub fn from_body(status: u16, body: ErrorBody) -> Self {
        Self {
            status,
            message: body.message,
            field_errors: body.field_errors,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status == STATUS_NETWORK {
            write!(f, "Network error: {}", self.message)
        } else {
            write!(f, "{} ({})", self.message, self.status)
        }
    }
}

/// What the manage helpers need from an HTTP client.
/// `path` is relative to the API base, query string included.
pub trait Transport: Clone + 'static {
    fn get<T: DeserializeOwned>(&self, path: &str) -> impl Future<Output = Result<T, ApiError>>;

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> impl Future<Output = Result<T, ApiError>>;
}

/// Browser client built on `gloo-net`
#[derive(Clone, Copy)]
pub struct HttpClient {
    set_auth_state: Option<WriteSignal<AuthState>>,
    toasts: Option<ToastService>,
}

impl HttpClient {
    pub fn new(
        set_auth_state: Option<WriteSignal<AuthState>>,
        toasts: Option<ToastService>,
    ) -> Self {
        Self {
            set_auth_state,
            toasts,
        }
    }

    /// Client wired to the auth and toast contexts of the current owner
    pub fn from_context() -> Self {
        Self::new(
            use_context::<WriteSignal<AuthState>>(),
            use_context::<ToastService>(),
        )
    }

    fn bearer() -> Option<String> {
        storage::get_access_token().map(|token| format!("Bearer {}", token))
    }

    async fn read<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        response: Result<Response, gloo_net::Error>,
    ) -> Result<T, ApiError> {
        let result = match response {
            Err(e) => Err(ApiError::network(e.to_string())),
            Ok(response) if response.ok() => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::new(response.status(), format!("Invalid response: {}", e))),
            Ok(response) => {
                let status = response.status();
                let body = response
                    .json::<ErrorBody>()
                    .await
                    .unwrap_or_else(|_| ErrorBody::new(response.status_text()));
                Err(ApiError::from_body(status, body))
            }
        };

        if let Err(err) = &result {
            self.report(method, path, err);
        }
        result
    }

    fn report(&self, method: &str, path: &str, err: &ApiError) {
        log::error!("{} {} failed: {}", method, path, err);

        if err.is_unauthorized() {
            if let Some(set_auth_state) = self.set_auth_state {
                sign_out(set_auth_state);
            } else {
                storage::clear_access_token();
            }
        }

        if let Some(toasts) = self.toasts {
            toasts.error(err.to_string());
        }
    }
}

impl Transport for HttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let mut request = Request::get(&api_url(path)).header("Accept", "application/json");
        if let Some(bearer) = Self::bearer() {
            request = request.header("Authorization", &bearer);
        }

        let response = request.send().await;
        self.read("GET", path, response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let mut request = Request::post(&api_url(path)).header("Accept", "application/json");
        if let Some(bearer) = Self::bearer() {
            request = request.header("Authorization", &bearer);
        }

        let response = match request.json(body) {
            Ok(request) => request.send().await,
            Err(e) => Err(e),
        };
        self.read("POST", path, response).await
    }
}
