//! Token Service
//!
//! Signs and verifies the three JWT families used by the auth flows:
//! access tokens, refresh tokens and forgot-password tokens. All HS256,
//! each with its own secret so tokens are never interchangeable.
//!
//! Forgot-password tokens are signed with the configured secret
//! concatenated with the user's current password hash. Changing the
//! password therefore invalidates any outstanding reset link.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::user_password::UserPassword;
use crate::error::{AuthError, AuthResult};

/// Claims carried by access and refresh tokens
///
/// Both token families share the payload; only the secret and TTL differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// User id (UUID string)
    pub sub: String,
    pub email: String,
    pub display_name: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by forgot-password tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetClaims {
    /// User id (UUID string)
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Freshly signed access + refresh token pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT signing and verification service
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Sign a fresh access + refresh pair for a user
    pub fn issue_pair(&self, user: &User) -> AuthResult<TokenPair> {
        let now = Utc::now().timestamp();

        let access = AccessClaims {
            sub: user.user_id.to_string(),
            email: user.email.to_string(),
            display_name: user.display_name.to_string(),
            iat: now,
            exp: now + self.config.access_token_ttl_secs(),
        };

        let refresh = AccessClaims {
            exp: now + self.config.refresh_token_ttl_secs(),
            ..access.clone()
        };

        Ok(TokenPair {
            access_token: sign(&access, self.config.access_token_secret.as_bytes())?,
            refresh_token: sign(&refresh, self.config.refresh_token_secret.as_bytes())?,
        })
    }

    /// Verify an access token (signature + expiry)
    pub fn verify_access(&self, token: &str) -> AuthResult<AccessClaims> {
        verify(token, self.config.access_token_secret.as_bytes())
    }

    /// Verify a refresh token (signature + expiry).
    /// Callers must additionally match it against the stored hash.
    pub fn verify_refresh(&self, token: &str) -> AuthResult<AccessClaims> {
        verify(token, self.config.refresh_token_secret.as_bytes())
    }

    /// Sign a forgot-password token, salted with the current password hash
    pub fn forgot_password_token(&self, user: &User) -> AuthResult<String> {
        let now = Utc::now().timestamp();

        let claims = ResetClaims {
            sub: user.user_id.to_string(),
            email: user.email.to_string(),
            iat: now,
            exp: now + self.config.access_token_ttl_secs(),
        };

        sign(&claims, self.reset_secret(&user.password_hash).as_bytes())
    }

    /// Verify a forgot-password token against the user's current hash
    pub fn verify_forgot_token(
        &self,
        token: &str,
        password_hash: &UserPassword,
    ) -> AuthResult<ResetClaims> {
        verify(token, self.reset_secret(password_hash).as_bytes())
    }

    fn reset_secret(&self, password_hash: &UserPassword) -> String {
        format!(
            "{}{}",
            self.config.forgot_password_secret,
            password_hash.as_phc_string()
        )
    }
}

fn sign<C: Serialize>(claims: &C, secret: &[u8]) -> AuthResult<String> {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
        .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))
}

fn verify<C: for<'de> Deserialize<'de>>(token: &str, secret: &[u8]) -> AuthResult<C> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<C>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::TokenInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        display_name::DisplayName, email::Email, user_password::{RawPassword, UserPassword},
    };

    fn test_user() -> User {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        User::new(
            Email::new("user@example.com").unwrap(),
            DisplayName::new("Test User").unwrap(),
            UserPassword::from_raw(&raw).unwrap(),
        )
    }

    fn service() -> TokenService {
        TokenService::new(Arc::new(AuthConfig::development()))
    }

    #[test]
    fn test_issue_pair_and_verify() {
        let service = service();
        let user = test_user();

        let pair = service.issue_pair(&user).unwrap();

        let access = service.verify_access(&pair.access_token).unwrap();
        assert_eq!(access.sub, user.user_id.to_string());
        assert_eq!(access.email, "user@example.com");
        assert_eq!(access.display_name, "Test User");

        let refresh = service.verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh.sub, access.sub);
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_tokens_not_interchangeable() {
        let service = service();
        let user = test_user();

        let pair = service.issue_pair(&user).unwrap();

        assert!(service.verify_access(&pair.refresh_token).is_err());
        assert!(service.verify_refresh(&pair.access_token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = service();

        assert!(matches!(
            service.verify_access("not.a.jwt"),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_forgot_token_verifies_against_current_hash() {
        let service = service();
        let user = test_user();

        let token = service.forgot_password_token(&user).unwrap();
        let claims = service
            .verify_forgot_token(&token, &user.password_hash)
            .unwrap();

        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_forgot_token_invalidated_by_password_change() {
        let service = service();
        let mut user = test_user();

        let token = service.forgot_password_token(&user).unwrap();

        let new_raw = RawPassword::new("ChangedPassword456!".to_string()).unwrap();
        user.set_password(UserPassword::from_raw(&new_raw).unwrap());

        assert!(matches!(
            service.verify_forgot_token(&token, &user.password_hash),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_claims_serialize_camel_case() {
        let claims = AccessClaims {
            sub: "id".to_string(),
            email: "user@example.com".to_string(),
            display_name: "Test".to_string(),
            iat: 1,
            exp: 2,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("displayName").is_some());
        assert!(json.get("display_name").is_none());
    }
}
