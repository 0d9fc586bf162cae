//! Core business logic for the authentication system.
//!
//! Ties the credential store to the token service: successful registration
//! and login both end with a freshly issued bearer token.

use crate::auth::errors::AuthResult;
use crate::auth::models::*;
use crate::repositories::user_repository::UserStore;
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use tracing::info;
use validator::Validate;

/// Authentication service for registration, login and password resets
pub struct AuthService<'a, S: UserStore> {
    user_service: UserService<S>,
    jwt_utils: &'a JwtUtils,
}

impl<'a, S: UserStore> AuthService<'a, S> {
    pub fn new(store: S, jwt_utils: &'a JwtUtils, bcrypt_cost: u32) -> Self {
        AuthService {
            user_service: UserService::new(store, bcrypt_cost),
            jwt_utils,
        }
    }

    /// Register a user and issue their first token
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<TokenResponse> {
        request.validate()?;

        let user_id = self
            .user_service
            .register(&request.handle, &request.password)
            .await?;
        let token = self.jwt_utils.issue(&user_id)?;

        Ok(TokenResponse { token })
    }

    /// Authenticate a user and issue a token
    pub async fn login(&self, request: LoginRequest) -> AuthResult<TokenResponse> {
        request.validate()?;

        let user_id = self
            .user_service
            .verify_credentials(&request.handle, &request.password)
            .await?;
        let token = self.jwt_utils.issue(&user_id)?;

        info!(user_id = %user_id, "User logged in");
        Ok(TokenResponse { token })
    }

    /// Replace a user's password after confirming it
    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> AuthResult<MessageResponse> {
        request.validate()?;

        self.user_service
            .reset_password(&request.handle, &request.password, &request.confirm_password)
            .await?;

        Ok(MessageResponse {
            message: "Password reset successful".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::errors::AuthError;
    use crate::database::test_pool;
    use crate::repositories::user_repository::UserRepository;

    fn register_request(handle: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            handle: handle.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(handle: &str, password: &str) -> LoginRequest {
        LoginRequest {
            handle: handle.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_tokens_share_subject() {
        let pool = test_pool().await;
        let jwt = JwtUtils::from_secret("test-secret", None);
        let auth = AuthService::new(UserRepository::new(&pool), &jwt, 4);

        let a = auth
            .register(register_request("alice@example.com", "pw123"))
            .await
            .unwrap();
        let b = auth
            .login(login_request("alice@example.com", "pw123"))
            .await
            .unwrap();

        let id_a = jwt.verify(&a.token).unwrap();
        let id_b = jwt.verify(&b.token).unwrap();
        assert_eq!(id_a, id_b);

        assert!(matches!(
            auth.login(login_request("alice@example.com", "wrong")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_reset_password_flow() {
        let pool = test_pool().await;
        let jwt = JwtUtils::from_secret("test-secret", None);
        let auth = AuthService::new(UserRepository::new(&pool), &jwt, 4);
        auth.register(register_request("bob", "old")).await.unwrap();

        let mismatch = ResetPasswordRequest {
            handle: "bob".to_string(),
            password: "new".to_string(),
            confirm_password: "neww".to_string(),
        };
        assert!(matches!(
            auth.reset_password(mismatch).await,
            Err(AuthError::PasswordMismatch)
        ));
        auth.login(login_request("bob", "old")).await.unwrap();

        let reset = ResetPasswordRequest {
            handle: "bob".to_string(),
            password: "new".to_string(),
            confirm_password: "new".to_string(),
        };
        let response = auth.reset_password(reset).await.unwrap();
        assert_eq!(response.message, "Password reset successful");
        auth.login(login_request("bob", "new")).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_payload_rejected_before_store() {
        let pool = test_pool().await;
        let jwt = JwtUtils::from_secret("test-secret", None);
        let auth = AuthService::new(UserRepository::new(&pool), &jwt, 4);

        assert!(matches!(
            auth.register(register_request("", "pw")).await,
            Err(AuthError::Validation(_))
        ));
    }
}
