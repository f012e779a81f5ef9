//! Forgot Password Use Case
//!
//! Mints a short-lived reset token and mails the reset link. The token
//! is salted with the user's current password hash, so it becomes
//! single-use: completing the reset invalidates it.

use std::sync::Arc;

use crate::domain::mailer::ResetMailer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::application::config::AuthConfig;
use crate::application::tokens::TokenService;

/// Forgot password input
pub struct ForgotPasswordInput {
    pub email: String,
}

/// Forgot password use case
pub struct ForgotPasswordUseCase<R, M>
where
    R: UserRepository,
    M: ResetMailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R, M> ForgotPasswordUseCase<R, M>
where
    R: UserRepository,
    M: ResetMailer,
{
    pub fn new(
        repo: Arc<R>,
        mailer: Arc<M>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            mailer,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: ForgotPasswordInput) -> AuthResult<()> {
        let email = Email::new(input.email).map_err(|_| AuthError::UserNotFound)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self.tokens.forgot_password_token(&user)?;

        let reset_url = format!(
            "{}/reset-password/{}/{}",
            self.config.app_url, user.user_id, token
        );

        self.mailer
            .send_reset_link(&user.email, user.display_name.as_str(), &reset_url)
            .await
            .map_err(|_| AuthError::MailDelivery)?;

        tracing::info!(user_id = %user.user_id, "Password reset link sent");

        Ok(())
    }
}
