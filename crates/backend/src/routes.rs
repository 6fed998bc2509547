use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::domain::a001_user::service::UserService;
use crate::domain::a002_role::service::RoleService;
use crate::domain::a003_currency::service::CurrencyService;
use crate::domain::a004_crypto_asset::service::CryptoAssetService;
use crate::domain::a005_payment_method::service::PaymentMethodService;
use crate::manage::routes::nest;
use crate::shared::state::AppState;
use crate::system;

/// `/manage/...` of every resource, behind the bearer token check
fn manage_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new();
    let router = nest::<UserService>(router);
    let router = nest::<RoleService>(router);
    let router = nest::<CurrencyService>(router);
    let router = nest::<CryptoAssetService>(router);
    let router = nest::<PaymentMethodService>(router);
    router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        system::auth::require_token,
    ))
}

/// Application router: health check, the manage API and, when configured,
/// the built console as fallback.
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let mut router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(manage_routes(&state));

    if let Some(dir) = state.config.server.static_dir.as_deref() {
        tracing::info!("Serving static files from {}", dir);
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::{AuthConfig, Config, DatabaseConfig, SeedConfig, ServerConfig};
    use crate::shared::data::db::in_memory;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const TOKEN: &str = "test-token";

    async fn app() -> Router {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                static_dir: None,
            },
            database: DatabaseConfig {
                path: ":memory:".into(),
            },
            auth: AuthConfig {
                tokens: vec![TOKEN.into()],
            },
            seed: SeedConfig::default(),
        };
        let db = in_memory().await.unwrap();
        configure_routes(AppState::new(db, config))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        call(app, Method::GET, uri, None).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        call(app, Method::POST, uri, Some(body)).await
    }

    fn role(code: &str) -> Value {
        json!({ "name": format!("{} role", code), "code": code })
    }

    #[tokio::test]
    async fn manage_requires_a_token() {
        let app = app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/manage/role/page")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/manage/role/page")
                    .header(header::AUTHORIZATION, "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_then_page_with_filters() {
        let app = app().await;
        for code in ["ADMIN", "OPERATOR", "AUDITOR"] {
            let (status, row) = post_json(&app, "/manage/role/create", role(code)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(row["code"], code);
            assert_eq!(row["status"], "ENABLED");
        }

        let (status, page) = get_json(&app, "/manage/role/page?currentPage=1&pageSize=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalNum"], 3);
        // Newest first
        assert_eq!(page["data"][0]["code"], "AUDITOR");

        let (_, page) = get_json(&app, "/manage/role/page?code=OPER&name=").await;
        assert_eq!(page["totalNum"], 1);
        assert_eq!(page["data"][0]["code"], "OPERATOR");
    }

    #[tokio::test]
    async fn pages_split_the_total() {
        let app = app().await;
        for n in 0..7 {
            post_json(&app, "/manage/role/create", role(&format!("R{}", n))).await;
        }

        let (_, first) = get_json(&app, "/manage/role/page?currentPage=1&pageSize=3").await;
        let (_, last) = get_json(&app, "/manage/role/page?currentPage=3&pageSize=3").await;
        let (_, beyond) = get_json(&app, "/manage/role/page?currentPage=9&pageSize=3").await;

        assert_eq!(first["totalNum"], 7);
        assert_eq!(first["data"].as_array().unwrap().len(), 3);
        assert_eq!(last["data"].as_array().unwrap().len(), 1);
        assert_eq!(beyond["totalNum"], 7);
        assert!(beyond["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn huge_current_page_is_an_empty_page() {
        let app = app().await;
        for code in ["A", "B"] {
            post_json(&app, "/manage/role/create", role(code)).await;
        }

        let (status, page) = get_json(
            &app,
            "/manage/role/page?currentPage=18446744073709551615&pageSize=500",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalNum"], 2);
        assert!(page["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_required_field_lists_field_errors() {
        let app = app().await;
        let (status, body) = post_json(
            &app,
            "/manage/currency/create",
            json!({ "code": "USD", "symbol": "$", "precision": 2 }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fieldErrors"][0]["field"], "name");
    }

    #[tokio::test]
    async fn malformed_requests_get_an_error_body() {
        let app = app().await;

        let (status, body) = get_json(&app, "/manage/role/detail/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/manage/role/create")
                    .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"name\": "))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].is_string());

        let (status, body) =
            post_json(&app, "/manage/role/remove", json!({ "id": "one" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn invalid_form_lists_field_errors() {
        let app = app().await;
        let (status, body) = post_json(
            &app,
            "/manage/currency/create",
            json!({ "code": "usd", "name": "", "symbol": "$", "precision": 2 }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<&str> = body["fieldErrors"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["field"].as_str())
            .collect();
        assert_eq!(fields, ["code", "name"]);
    }

    #[tokio::test]
    async fn duplicate_code_is_a_conflict() {
        let app = app().await;
        post_json(&app, "/manage/role/create", role("ADMIN")).await;
        let (status, body) = post_json(&app, "/manage/role/create", role("ADMIN")).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["fieldErrors"][0]["field"], "code");
    }

    #[tokio::test]
    async fn update_requires_id_and_existing_record() {
        let app = app().await;
        let (_, row) = post_json(&app, "/manage/role/create", role("ADMIN")).await;

        let (status, _) = post_json(&app, "/manage/role/update", role("ADMIN")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(
            &app,
            "/manage/role/update",
            json!({ "id": 999, "name": "x", "code": "X" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, updated) = post_json(
            &app,
            "/manage/role/update",
            json!({ "id": row["id"], "name": "Admins", "code": "ADMIN" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Admins");
        assert_eq!(updated["createdAt"], row["createdAt"]);

        let (_, detail) = get_json(&app, &format!("/manage/role/detail/{}", row["id"])).await;
        assert_eq!(detail["name"], "Admins");

        let (status, _) = get_json(&app, "/manage/role/detail/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn change_status_and_status_filter() {
        let app = app().await;
        let (_, admin) = post_json(&app, "/manage/role/create", role("ADMIN")).await;
        post_json(&app, "/manage/role/create", role("AUDITOR")).await;

        let (status, body) = post_json(
            &app,
            "/manage/role/change-status",
            json!({ "id": admin["id"], "status": "DISABLED" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "DISABLED");

        let (_, page) = get_json(&app, "/manage/role/page?status=DISABLED").await;
        assert_eq!(page["totalNum"], 1);
        assert_eq!(page["data"][0]["code"], "ADMIN");

        let (status, _) = get_json(&app, "/manage/role/page?status=ARCHIVED").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(
            &app,
            "/manage/role/change-status",
            json!({ "id": 999, "status": "ENABLED" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn remove_and_delete_batch() {
        let app = app().await;
        let mut ids = Vec::new();
        for code in ["A", "B", "C"] {
            let (_, row) = post_json(&app, "/manage/role/create", role(code)).await;
            ids.push(row["id"].clone());
        }

        let (status, body) = post_json(&app, "/manage/role/remove", json!({ "id": ids[0] })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 1);

        let (status, _) = post_json(&app, "/manage/role/remove", json!({ "id": ids[0] })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = post_json(
            &app,
            "/manage/role/delete-batch",
            json!({ "idList": [ids[1], ids[2], 999] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 2);

        let (status, body) =
            post_json(&app, "/manage/role/delete-batch", json!({ "idList": [] })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 0);

        let (_, page) = get_json(&app, "/manage/role/page").await;
        assert_eq!(page["totalNum"], 0);
    }

    #[tokio::test]
    async fn role_in_use_is_kept() {
        let app = app().await;
        let (_, admin) = post_json(&app, "/manage/role/create", role("ADMIN")).await;
        let (status, _) = post_json(
            &app,
            "/manage/user/create",
            json!({ "username": "root", "roleId": admin["id"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            post_json(&app, "/manage/role/remove", json!({ "id": admin["id"] })).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].as_str().unwrap().contains("1 user"));

        let (_, list) = get_json(&app, "/manage/role/list").await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }
}
