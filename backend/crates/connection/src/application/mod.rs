//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod google_connect;
pub mod google_sign_in;

// Re-exports
pub use config::GoogleConfig;
pub use google_connect::{GoogleConnectInput, GoogleConnectUseCase};
pub use google_sign_in::{GoogleSignInInput, GoogleSignInUseCase};

use auth::domain::repository::UserRepository;
use auth::models::UserId;
use platform::password::HashedSecret;

use crate::error::{ConnectionError, ConnectionResult};

/// Persist the Argon2id hash of a freshly issued refresh token.
/// Mirrors the auth crate's rotation bookkeeping so Google sign-in
/// participates in the same refresh session.
pub(crate) async fn store_refresh_hash<R: UserRepository>(
    repo: &R,
    user_id: &UserId,
    refresh_token: &str,
) -> ConnectionResult<()> {
    let hash = HashedSecret::from_secret(refresh_token.as_bytes())
        .map_err(|e| ConnectionError::Internal(format!("Refresh token hashing failed: {}", e)))?;

    repo.update_refresh_token_hash(user_id, Some(&hash)).await?;

    Ok(())
}
