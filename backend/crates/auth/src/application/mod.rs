//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod forgot_password;
pub mod refresh;
pub mod reset_password;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod tokens;

// Re-exports
pub use config::AuthConfig;
pub use forgot_password::{ForgotPasswordInput, ForgotPasswordUseCase};
pub use refresh::RefreshUseCase;
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use tokens::{AccessClaims, ResetClaims, TokenPair, TokenService};

use platform::password::HashedSecret;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Persist the Argon2id hash of a freshly issued refresh token,
/// replacing whatever hash was stored before.
///
/// Every flow that issues a token pair goes through here, so the stored
/// hash always matches exactly one outstanding refresh token.
pub(crate) async fn store_refresh_hash<R: UserRepository>(
    repo: &R,
    user_id: &UserId,
    refresh_token: &str,
) -> AuthResult<()> {
    let hash = HashedSecret::from_secret(refresh_token.as_bytes())
        .map_err(|e| AuthError::Internal(format!("Refresh token hashing failed: {}", e)))?;

    repo.update_refresh_token_hash(user_id, Some(&hash)).await?;

    Ok(())
}
