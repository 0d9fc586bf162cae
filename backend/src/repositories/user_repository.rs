//! Database repository for user credential records.
//!
//! `UserStore` is the persistence seam used by the credential service;
//! `UserRepository` implements it on SQLite.

use crate::database::models::{CreateUser, User};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, handle, password_hash, created_at, updated_at";

/// Persistence operations the credential service relies on.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive match on the handle.
    async fn find_by_handle(&self, handle: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Inserts the user unless the handle is taken. Returns `None` when a
    /// user with the same handle already exists; the check and the insert
    /// are a single statement.
    async fn insert_if_absent(&self, user: CreateUser) -> Result<Option<User>>;

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<()>;

    async fn delete_by_id(&self, id: &str) -> Result<()>;
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository<'_> {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE handle = ?"
        ))
        .bind(handle)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_if_absent(&self, user: CreateUser) -> Result<Option<User>> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, handle, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(handle) DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.id)
        .bind(&user.handle)
        .bind(&user.password_hash)
        .bind(now)
        .bind(now)
        .fetch_optional(self.pool)
        .await?;

        Ok(created)
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
