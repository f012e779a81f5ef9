//! Sign In Use Case
//!
//! Authenticates a user by email + password and issues a token pair.

use std::sync::Arc;

use crate::application::tokens::{TokenPair, TokenService};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<TokenPair> {
        let email = Email::new(input.email).map_err(|_| AuthError::UserNotFound)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password) {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.tokens.issue_pair(&user)?;
        super::store_refresh_hash(self.repo.as_ref(), &user.user_id, &pair.refresh_token).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(pair)
    }
}
