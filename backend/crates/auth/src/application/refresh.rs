//! Refresh Use Case
//!
//! Rotates the refresh token. The presented token must pass two checks:
//! its JWT signature + expiry, and an Argon2id match against the hash
//! stored on the user row. A stale or reused token, or a logged-out
//! user, fails the second check and gets 403 without new tokens.

use std::sync::Arc;
use uuid::Uuid;

use crate::application::tokens::{TokenPair, TokenService};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> RefreshUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let claims = self.tokens.verify_refresh(refresh_token)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map(UserId::from_uuid)
            .map_err(|_| AuthError::TokenInvalid)?;

        let user = self
            .repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::AccessDenied)?;

        let stored_hash = user
            .refresh_token_hash
            .as_ref()
            .ok_or(AuthError::AccessDenied)?;

        if !stored_hash.verify(refresh_token.as_bytes()) {
            tracing::warn!(user_id = %user.user_id, "Stale refresh token presented");
            return Err(AuthError::AccessDenied);
        }

        let pair = self.tokens.issue_pair(&user)?;
        super::store_refresh_hash(self.repo.as_ref(), &user.user_id, &pair.refresh_token).await?;

        tracing::debug!(user_id = %user.user_id, "Refresh tokens rotated");

        Ok(pair)
    }
}
