//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse incoming requests for registration, login and
//! password resets and hand them to `auth::service` for the actual work.

use crate::api::common::{ApiError, auth_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{Extension, Json},
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Arc<Config>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<ResponseJson<TokenResponse>, ApiError> {
    let auth_service =
        AuthService::new(UserRepository::new(&pool), &jwt_utils, config.bcrypt_cost);

    auth_service
        .register(payload)
        .await
        .map(ResponseJson)
        .map_err(auth_error_to_http)
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Arc<Config>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<TokenResponse>, ApiError> {
    let auth_service =
        AuthService::new(UserRepository::new(&pool), &jwt_utils, config.bcrypt_cost);

    auth_service
        .login(payload)
        .await
        .map(ResponseJson)
        .map_err(auth_error_to_http)
}

/// Handle password reset request
#[axum::debug_handler]
pub async fn reset_password(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Arc<Config>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<ResponseJson<MessageResponse>, ApiError> {
    let auth_service =
        AuthService::new(UserRepository::new(&pool), &jwt_utils, config.bcrypt_cost);

    auth_service
        .reset_password(payload)
        .await
        .map(ResponseJson)
        .map_err(auth_error_to_http)
}
