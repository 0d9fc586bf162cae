//! Middleware for protecting authenticated routes.
//!
//! `authorize` turns the raw `Authorization` header into an `AuthContext`;
//! `jwt_auth` runs it for every protected route and hands the context to
//! the handlers through the request extensions.

use crate::api::common::{ApiError, auth_error_to_http};
use crate::auth::errors::{AuthError, AuthResult};
use crate::auth::models::AuthContext;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Resolves the caller's identity from an `Authorization` header value.
///
/// The token is the second whitespace-separated word of the header. A missing
/// header or token is `Unauthorized`; any verification failure is `Forbidden`.
pub fn authorize(header: Option<&str>, jwt_utils: &JwtUtils) -> AuthResult<AuthContext> {
    let token = header
        .and_then(|value| value.split_whitespace().nth(1))
        .ok_or(AuthError::Unauthorized)?;

    let user_id = jwt_utils.verify(token).map_err(|error| {
        warn!("Rejected bearer token: {}", error);
        AuthError::Forbidden
    })?;

    Ok(AuthContext { user_id })
}

/// JWT authentication middleware
///
/// A header that is present but not visible ASCII is an unusable credential
/// and is rejected as `Forbidden`, not treated as missing.
pub async fn jwt_auth(
    Extension(jwt_utils): Extension<JwtUtils>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|_| {
            warn!("Rejected non-ASCII Authorization header");
            auth_error_to_http(AuthError::Forbidden)
        })?;

    let context = authorize(header, &jwt_utils).map_err(auth_error_to_http)?;

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}
