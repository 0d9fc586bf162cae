//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Request payloads that create or change rows live here as
//! well and carry their validation rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as DeError};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Stored user identity. The password hash never leaves the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub handle: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row about to be inserted into `users`.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub handle: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub amount: f64,
    pub date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExpense {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1-255 characters"
    ))]
    pub title: String,

    #[validate(custom(function = "validate_amount"))]
    pub amount: f64,

    #[serde(default, deserialize_with = "deserialize_expense_date")]
    pub date: Option<DateTime<Utc>>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExpense {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1-255 characters"
    ))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_expense_date")]
    pub date: Option<DateTime<Utc>>,
}

fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount < 0.0 {
        let mut error = ValidationError::new("amount");
        error.message = Some("Amount must be a non-negative number".into());
        return Err(error);
    }
    Ok(())
}

/// Accepts either a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date
/// (taken as midnight UTC), which is what HTML date inputs submit.
fn deserialize_expense_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => {
            let s = s.trim();
            if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
                return Ok(Some(timestamp.with_timezone(&Utc)));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Some(naive.and_utc()))
                .ok_or_else(|| DeError::custom(format!("Invalid date '{}'", s)))
        }
    }
}
