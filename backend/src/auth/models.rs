//! Data structures for authentication requests and responses.
//!
//! The `handle` field accepts `username` and `email` as aliases so both
//! flavours of client payload deserialize into the same types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(alias = "username", alias = "email")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Handle must be between 1-255 characters"
    ))]
    pub handle: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "email")]
    #[validate(length(min = 1, message = "Handle is required"))]
    pub handle: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password reset payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(alias = "username", alias = "email")]
    #[validate(length(min = 1, message = "Handle is required"))]
    pub handle: String,

    #[serde(alias = "newPassword")]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(alias = "confirm_password")]
    pub confirm_password: String,
}

/// Issued bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Identity of the caller, attached to the request by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
}
