//! Sign Out Use Case
//!
//! Revokes the refresh session by clearing the stored hash. The old
//! refresh token keeps its signature until expiry but can no longer
//! pass the stored-hash check.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> SignOutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns true when a user row was actually updated
    pub async fn execute(&self, user_id: &UserId) -> AuthResult<bool> {
        let updated = self.repo.update_refresh_token_hash(user_id, None).await?;

        if updated > 0 {
            tracing::info!(user_id = %user_id, "User signed out");
        }

        Ok(updated > 0)
    }
}
