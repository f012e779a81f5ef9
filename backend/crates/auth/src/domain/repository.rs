//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};
use crate::error::AuthResult;
use platform::password::HashedSecret;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Replace the password hash
    async fn update_password(&self, user_id: &UserId, password: &UserPassword) -> AuthResult<()>;

    /// Replace or clear the stored refresh token hash.
    /// Returns the number of rows updated (0 when the user is gone).
    async fn update_refresh_token_hash(
        &self,
        user_id: &UserId,
        hash: Option<&HashedSecret>,
    ) -> AuthResult<u64>;
}
