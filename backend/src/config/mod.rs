//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secret and password hashing cost.
//! The configuration is built once at startup and shared read-only afterwards.

use anyhow::{Context, Result, bail};
use std::env;

/// Lowest and highest work factors accepted by bcrypt.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Longest token lifetime accepted, 100 years.
const MAX_JWT_EXPIRES_IN_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    /// `None` issues tokens without an `exp` claim.
    pub jwt_expires_in_seconds: Option<u64>,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    pub cors_allowed_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = lookup("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_expires_in_seconds = lookup("JWT_EXPIRES_IN_SECONDS")
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.parse::<u64>())
            .transpose()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;
        if jwt_expires_in_seconds.is_some_and(|secs| secs > MAX_JWT_EXPIRES_IN_SECONDS) {
            bail!(
                "JWT_EXPIRES_IN_SECONDS must be at most {}",
                MAX_JWT_EXPIRES_IN_SECONDS
            );
        }

        let bcrypt_cost = lookup("BCRYPT_COST")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            bail!(
                "BCRYPT_COST must be between {} and {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end()
            );
        }

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let cors_allowed_origin =
            lookup("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| "*".to_string());

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            bcrypt_cost,
            server_port,
            cors_allowed_origin,
        })
    }
}
