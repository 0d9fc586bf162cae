//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user registration, login and password resets and are
//! designed to be nested into the main Axum router.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/reset-password", post(reset_password))
}
