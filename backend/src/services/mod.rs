//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business operations
//! and orchestrate interactions between repositories, such as user credential
//! management and expense bookkeeping.

pub mod expense_service;
pub mod user_service;
