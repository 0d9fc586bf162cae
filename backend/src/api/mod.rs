//! Central module for organizing the application's API endpoints.
//!
//! This module holds the expense endpoints and the shared response helpers,
//! and assembles them together with the authentication routes into the
//! application router.

pub mod common;
pub mod expense;

use crate::api::common::ApiResponse;
use crate::auth;
use crate::config::Config;
use crate::utils::jwt::JwtUtils;
use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    http::HeaderValue,
    response::Json,
    routing::get,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Builds the full application router with its shared state layers.
pub fn app_router(pool: SqlitePool, jwt_utils: JwtUtils, config: Arc<Config>) -> Result<Router> {
    let cors = cors_layer(&config.cors_allowed_origin)?;

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/api", auth::routes::auth_router())
        .nest("/api/expenses", expense::routes::expense_router())
        .layer(Extension(pool))
        .layer(Extension(jwt_utils))
        .layer(Extension(config))
        .layer(cors);

    Ok(app)
}

fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    if allowed_origin == "*" {
        return Ok(CorsLayer::permissive());
    }

    let origin = allowed_origin
        .parse::<HeaderValue>()
        .context("CORS_ALLOWED_ORIGIN must be a valid header value")?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Expense Tracker Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the Expense Tracker API",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "test-secret".to_string(),
            jwt_expires_in_seconds: None,
            bcrypt_cost: 4,
            server_port: 0,
            cors_allowed_origin: "*".to_string(),
        })
    }

    async fn test_app() -> Router {
        let config = test_config();
        let jwt_utils = JwtUtils::new(&config);
        app_router(test_pool().await, jwt_utils, config).unwrap()
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(app: &Router, handle: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/register",
            None,
            Some(json!({ "email": handle, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_root_banner() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_auth_endpoints() {
        let app = test_app().await;
        register(&app, "alice@example.com", "pw123").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/register",
            None,
            Some(json!({ "email": "alice@example.com", "password": "pw123" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["error_type"], "duplicate_handle");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "pw123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].is_string());

        let (wrong_status, wrong_body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "nope" })),
        )
        .await;
        let (unknown_status, unknown_body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "pw123" })),
        )
        .await;
        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body["message"], unknown_body["message"]);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/reset-password",
            None,
            Some(json!({
                "email": "alice@example.com",
                "password": "new",
                "confirmPassword": "different"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["error_type"], "password_mismatch");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/reset-password",
            None,
            Some(json!({
                "email": "alice@example.com",
                "password": "new",
                "confirmPassword": "new"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Password reset successful");
    }

    #[tokio::test]
    async fn test_expenses_require_token() {
        let app = test_app().await;

        let (status, _) = send(&app, Method::GET, "/api/expenses", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) =
            send(&app, Method::GET, "/api/expenses", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            Method::DELETE,
            "/api/expenses/some-id",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expense_crud_is_scoped() {
        let app = test_app().await;
        let alice = register(&app, "alice", "pw").await;
        let bob = register(&app, "bob", "pw").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(&alice),
            Some(json!({ "title": "Lunch", "amount": 12.5, "date": "2024-06-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, Method::GET, "/api/expenses", Some(&alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["pagination"]["total_items"], 1);

        let (_, body) = send(&app, Method::GET, "/api/expenses", Some(&bob), None).await;
        assert_eq!(body["data"]["total"], 0);

        let uri = format!("/api/expenses/{id}");
        let (status, _) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&bob),
            Some(json!({ "amount": 1.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(&alice),
            Some(json!({ "amount": 14.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["amount"], 14.0);
        assert_eq!(body["data"]["title"], "Lunch");

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, &uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, &uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_expense_rejected() {
        let app = test_app().await;
        let token = register(&app, "carol", "pw").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(&token),
            Some(json!({ "title": "", "amount": -3.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["error_type"], "validation_error");
    }
}
