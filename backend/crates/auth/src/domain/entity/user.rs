//! User Entity
//!
//! Core user entity. Credentials live here because the refresh token
//! lifecycle is tied to the user row.

use chrono::{DateTime, Utc};
use platform::password::HashedSecret;

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Email address (unique, used for login)
    pub email: Email,
    /// Display name shown to other users
    pub display_name: DisplayName,
    /// Argon2id hash of the password
    pub password_hash: UserPassword,
    /// Argon2id hash of the currently valid refresh token.
    /// `None` means no active refresh session (never signed in, or logged out).
    pub refresh_token_hash: Option<HashedSecret>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, display_name: DisplayName, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            display_name,
            password_hash,
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored refresh token hash (rotation)
    pub fn set_refresh_token_hash(&mut self, hash: HashedSecret) {
        self.refresh_token_hash = Some(hash);
        self.updated_at = Utc::now();
    }

    /// Clear the refresh token hash (logout)
    pub fn clear_refresh_token_hash(&mut self) {
        self.refresh_token_hash = None;
        self.updated_at = Utc::now();
    }

    /// Replace the password hash (reset)
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Whether a refresh session is currently active
    pub fn has_refresh_session(&self) -> bool {
        self.refresh_token_hash.is_some()
    }
}
