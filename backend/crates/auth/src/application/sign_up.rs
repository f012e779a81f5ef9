//! Sign Up Use Case
//!
//! Registers a new user and issues the first token pair.

use std::sync::Arc;

use crate::application::tokens::{TokenPair, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<TokenPair> {
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        let display_name = DisplayName::new(input.display_name)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(email, display_name, password_hash);
        self.repo.create(&user).await?;

        let pair = self.tokens.issue_pair(&user)?;
        super::store_refresh_hash(self.repo.as_ref(), &user.user_id, &pair.refresh_token).await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(pair)
    }
}
