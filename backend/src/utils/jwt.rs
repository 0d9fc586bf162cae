//! JWT token utilities for authentication and authorization.
//!
//! Tokens are HS256-signed and carry only the user id. The server keeps no
//! session state: a token is accepted whenever its signature checks out (and,
//! if expiry is configured, it has not expired).

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::auth::errors::{AuthError, AuthResult};
use crate::config::Config;

/// JWT claims issued to an authenticated user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token issued at timestamp
    pub iat: usize,
    /// Token expiration timestamp, only present when expiry is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

/// Signs and verifies bearer tokens with the process-wide secret.
#[derive(Clone)]
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: Option<u64>,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the loaded configuration
    pub fn new(config: &Config) -> Self {
        Self::from_secret(&config.jwt_secret, config.jwt_expires_in_seconds)
    }

    pub fn from_secret(secret: &str, expires_in_seconds: Option<u64>) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is optional; it is still checked whenever a token carries one.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        }
    }

    /// Issue a signed token for the given user
    pub fn issue(&self, user_id: &str) -> AuthResult<String> {
        let now = Utc::now();
        let exp = match self.expires_in_seconds {
            Some(secs) => Some(
                i64::try_from(secs)
                    .ok()
                    .and_then(TimeDelta::try_seconds)
                    .and_then(|lifetime| now.checked_add_signed(lifetime))
                    .map(|expires_at| expires_at.timestamp() as usize)
                    .ok_or_else(|| {
                        AuthError::Internal(format!("Token lifetime out of range: {}s", secs))
                    })?,
            ),
            None => None,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Verify a token and return the user id it was issued for
    pub fn verify(&self, token: &str) -> AuthResult<String> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    /// Validate and decode a JWT token
    pub fn decode_claims(&self, token: &str) -> AuthResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::MalformedToken,
            })
    }
}
