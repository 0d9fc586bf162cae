//! Collection of general utility modules.
//!
//! Holds small, reusable helpers that do not fit into a specific domain
//! module, currently the bearer token utilities.

pub mod jwt;
