//! Authentication module for managing user credentials and access control.
//!
//! This module provides registration, login, password resets, bearer token
//! handling and the middleware that guards identity-scoped routes.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
