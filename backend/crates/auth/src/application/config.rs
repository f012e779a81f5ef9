//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Access token cookie name
pub const ACCESS_TOKEN_COOKIE: &str = "JWT_ACCESS_TOKEN";

/// Refresh token cookie name
pub const REFRESH_TOKEN_COOKIE: &str = "JWT_REFRESH_TOKEN";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 secret for access tokens
    pub access_token_secret: String,
    /// HS256 secret for refresh tokens
    pub refresh_token_secret: String,
    /// HS256 base secret for forgot-password tokens.
    /// The user's current password hash is appended at signing time.
    pub forgot_password_secret: String,
    /// Access token TTL (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token TTL (7 days)
    pub refresh_token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Base URL used in reset links
    pub app_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: String::new(),
            refresh_token_secret: String::new(),
            forgot_password_secret: String::new(),
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            app_url: "http://localhost:3000".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with random secrets (for development)
    pub fn with_random_secrets() -> Self {
        Self {
            access_token_secret: uuid::Uuid::new_v4().to_string(),
            refresh_token_secret: uuid::Uuid::new_v4().to_string(),
            forgot_password_secret: uuid::Uuid::new_v4().to_string(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    /// Access token TTL in seconds
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.as_secs() as i64
    }

    /// Refresh token TTL in seconds
    pub fn refresh_token_ttl_secs(&self) -> i64 {
        self.refresh_token_ttl.as_secs() as i64
    }

    /// Cookie configuration for the access token
    pub fn access_cookie(&self) -> CookieConfig {
        CookieConfig {
            same_site: self.cookie_same_site,
            ..CookieConfig::token(
                ACCESS_TOKEN_COOKIE,
                self.access_token_ttl_secs(),
                self.cookie_secure,
            )
        }
    }

    /// Cookie configuration for the refresh token
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            same_site: self.cookie_same_site,
            ..CookieConfig::token(
                REFRESH_TOKEN_COOKIE,
                self.refresh_token_ttl_secs(),
                self.cookie_secure,
            )
        }
    }
}
