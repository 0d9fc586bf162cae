//! Module for expense API endpoints.
//!
//! Listing, creating, updating and deleting the authenticated user's
//! expense records.

pub mod handlers;
pub mod routes;
