//! Custom error types specific to authentication failures.
//!
//! Unknown handle and wrong password both surface as `InvalidCredentials`,
//! and every token verification failure becomes `Forbidden` once it reaches
//! the authorization gate. Callers never learn which check failed.

use thiserror::Error;
use validator::ValidationErrors;

use crate::errors::validation_message;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Handle already exists")]
    DuplicateHandle,

    #[error("Invalid handle or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(validation_message(&errors))
    }
}
