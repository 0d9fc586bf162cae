//! Data access layer.
//!
//! Repositories wrap the SQLite pool and expose typed queries per entity.

pub mod expense_repository;
pub mod user_repository;
