//! Reset Password Use Case
//!
//! Two operations: verify a reset link (used by the client before
//! showing the form) and perform the reset. Both check the token
//! against the user's current password hash, so a token minted before
//! a password change never verifies afterwards.

use std::sync::Arc;
use uuid::Uuid;

use crate::application::tokens::{ResetClaims, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Reset password input
pub struct ResetPasswordInput {
    pub new_password: String,
    pub password_confirmation: String,
}

/// Reset password use case
pub struct ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Verify a reset link without changing anything
    pub async fn verify(&self, user_id: &str, token: &str) -> AuthResult<ResetClaims> {
        let (_, claims) = self.load_and_verify(user_id, token).await?;
        Ok(claims)
    }

    /// Verify the reset link and store the new password
    pub async fn execute(
        &self,
        user_id: &str,
        token: &str,
        input: ResetPasswordInput,
    ) -> AuthResult<()> {
        let (user, _) = self.load_and_verify(user_id, token).await?;

        if input.new_password != input.password_confirmation {
            return Err(AuthError::PasswordMismatch);
        }

        let raw_password = RawPassword::new(input.new_password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;

        let password_hash = UserPassword::from_raw(&raw_password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.repo
            .update_password(&user.user_id, &password_hash)
            .await?;

        // The old refresh token was issued against the old credentials
        self.repo
            .update_refresh_token_hash(&user.user_id, None)
            .await?;

        tracing::info!(user_id = %user.user_id, "Password reset completed");

        Ok(())
    }

    async fn load_and_verify(&self, user_id: &str, token: &str) -> AuthResult<(User, ResetClaims)> {
        let user_id = Uuid::parse_str(user_id)
            .map(UserId::from_uuid)
            .map_err(|_| AuthError::TokenInvalid)?;

        let user = self
            .repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let claims = self.tokens.verify_forgot_token(token, &user.password_hash)?;

        // The token must belong to this user
        if claims.sub != user.user_id.to_string() {
            return Err(AuthError::TokenInvalid);
        }

        Ok((user, claims))
    }
}
