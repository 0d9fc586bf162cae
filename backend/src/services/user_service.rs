//! User credential business logic.
//!
//! Registers users, checks handle/password pairs and resets passwords. bcrypt
//! runs on the blocking thread pool so hashing never stalls request workers.

use crate::auth::errors::{AuthError, AuthResult};
use crate::database::models::CreateUser;
use crate::repositories::user_repository::UserStore;
use bcrypt::{hash, verify};
use tracing::{info, warn};
use uuid::Uuid;

pub struct UserService<S: UserStore> {
    store: S,
    /// bcrypt work factor for new hashes
    bcrypt_cost: u32,
}

impl<S: UserStore> UserService<S> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `store` - Persistence backend for user records
    /// * `bcrypt_cost` - Work factor used when hashing passwords
    pub fn new(store: S, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Registers a new user and returns its id.
    ///
    /// # Errors
    /// Returns `AuthError::DuplicateHandle` if the handle is already taken,
    /// `AuthError::StoreUnavailable` if the store fails.
    pub async fn register(&self, handle: &str, password: &str) -> AuthResult<String> {
        if self.store.find_by_handle(handle).await?.is_some() {
            return Err(AuthError::DuplicateHandle);
        }

        let password_hash = self.hash_password(password).await?;

        let user = CreateUser {
            id: Uuid::now_v7().to_string(),
            handle: handle.to_string(),
            password_hash,
        };

        // A concurrent registration may have claimed the handle since the
        // lookup above; the conditional insert settles it.
        let user = self
            .store
            .insert_if_absent(user)
            .await?
            .ok_or(AuthError::DuplicateHandle)?;

        info!(user_id = %user.id, "Registered new user");
        Ok(user.id)
    }

    /// Checks a handle/password pair and returns the user id.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidCredentials` both for an unknown handle and
    /// for a wrong password.
    pub async fn verify_credentials(&self, handle: &str, password: &str) -> AuthResult<String> {
        let Some(user) = self.store.find_by_handle(handle).await? else {
            // Spend roughly the same time as a real comparison.
            self.hash_password(password).await?;
            warn!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !Self::verify_password(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.id)
    }

    /// Replaces the password of an existing user.
    ///
    /// # Errors
    /// Returns `AuthError::UserNotFound` for an unknown handle and
    /// `AuthError::PasswordMismatch` when the confirmation differs. The stored
    /// hash is untouched in both cases.
    pub async fn reset_password(
        &self,
        handle: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> AuthResult<()> {
        let user = self
            .store
            .find_by_handle(handle)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if new_password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let password_hash = self.hash_password(new_password).await?;
        self.store
            .update_password_hash(&user.id, &password_hash)
            .await?;

        info!(user_id = %user.id, "Password reset");
        Ok(())
    }

    /// Hashes a password with a fresh salt
    async fn hash_password(&self, password: &str) -> AuthResult<String> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;

        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Compares a password against a stored hash
    async fn verify_password(password: &str, password_hash: &str) -> AuthResult<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(format!("Password verification failed: {}", e)))
    }
}
