//! Error handling utilities for API responses.
//!
//! Provides structured responses and conversion between service-layer errors
//! and HTTP responses. Includes:
//! - Standard response envelope
//! - ServiceError / AuthError to HTTP status code mapping
//! - Pagination support for list endpoints
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//!
//! Paginated responses include:
//! - `pagination`: Metadata about current page, total items, etc.

use crate::auth::errors::AuthError;
use crate::errors::ServiceError;
use axum::{http::StatusCode, response::Json as ResponseJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Error half of every handler result.
pub type ApiError = (StatusCode, ResponseJson<ApiResponse<()>>);

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Pagination metadata (present for paginated responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    /// Request timestamp
    pub timestamp: String,
}

/// Pagination metadata for list responses
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page number (1-indexed)
    pub current_page: u32,
    /// Number of items per page
    pub per_page: u32,
    /// Total number of items across all pages
    pub total_items: u64,
    /// Total number of pages
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<u32>,
}

/// Paginated response wrapper containing items and pagination metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedData<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
}

/// Pagination parameters for requests
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PaginationFilter {
    /// Page number (1-indexed)
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,
    /// Number of items per page
    #[validate(range(min = 1, max = 100, message = "Per page must be between 1-100"))]
    pub per_page: Option<u32>,
}

impl PaginationMeta {
    /// Create pagination metadata from page parameters and total count
    pub fn new(current_page: u32, per_page: u32, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            ((total_items - 1) / per_page as u64 + 1) as u32
        };

        let has_next = current_page < total_pages;
        let has_prev = current_page > 1;

        Self {
            current_page,
            per_page,
            total_items,
            total_pages,
            has_next,
            has_prev,
            next_page: has_next.then(|| current_page + 1),
            prev_page: has_prev.then(|| current_page - 1),
        }
    }

    pub fn from_filter(filter: &PaginationFilter, total_items: u64) -> Self {
        Self::new(filter.page(), filter.per_page(), total_items)
    }
}

impl<T> PaginatedData<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            pagination: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a successful paginated response
    pub fn paginated(data: T, pagination: PaginationMeta, message: impl Into<String>) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::success(data, message)
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>, error_type: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
            }),
            pagination: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl PaginationFilter {
    /// Get page number with default
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Get per_page with default
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(20)
    }

    /// Calculate offset for database queries
    pub fn offset(&self) -> u64 {
        (self.page().saturating_sub(1) as u64) * self.per_page() as u64
    }

    /// Get limit for database queries
    pub fn limit(&self) -> u64 {
        self.per_page() as u64
    }
}

impl Default for PaginationFilter {
    fn default() -> Self {
        Self {
            page: Some(1),
            per_page: Some(20),
        }
    }
}

fn error_response(status: StatusCode, error_type: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        ResponseJson(ApiResponse::<()>::error(message, error_type)),
    )
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    match error {
        ServiceError::Validation { message } => {
            error_response(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        ServiceError::NotFound { entity, identifier } => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} '{}' not found", entity, identifier),
        ),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error",
            )
        }
    }
}

/// Converts AuthError to an HTTP response. Token failures never reveal which
/// check failed.
pub fn auth_error_to_http(error: AuthError) -> ApiError {
    match error {
        AuthError::DuplicateHandle => error_response(
            StatusCode::BAD_REQUEST,
            "duplicate_handle",
            "Handle already exists",
        ),
        AuthError::InvalidCredentials => error_response(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Invalid handle or password",
        ),
        AuthError::UserNotFound => {
            error_response(StatusCode::BAD_REQUEST, "user_not_found", "User not found")
        }
        AuthError::PasswordMismatch => error_response(
            StatusCode::BAD_REQUEST,
            "password_mismatch",
            "Passwords do not match",
        ),
        AuthError::Unauthorized => {
            error_response(StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized")
        }
        AuthError::Forbidden
        | AuthError::MalformedToken
        | AuthError::InvalidSignature
        | AuthError::TokenExpired => {
            error_response(StatusCode::FORBIDDEN, "forbidden", "Forbidden")
        }
        AuthError::Validation(message) => {
            error_response(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        AuthError::StoreUnavailable(source) => {
            tracing::error!("Credential store error: {}", source);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_unavailable",
                "Internal server error",
            )
        }
        AuthError::Internal(message) => {
            tracing::error!("Internal auth error: {}", message);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
            )
        }
    }
}
