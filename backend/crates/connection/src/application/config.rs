//! Application Configuration

/// Google OAuth client configuration
#[derive(Debug, Clone, Default)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl GoogleConfig {
    /// Read client credentials from the environment.
    /// Returns None when the variables are absent.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            client_id: std::env::var("GOOGLE_CLIENT_ID").ok()?,
            client_secret: std::env::var("GOOGLE_CLIENT_SECRET").ok()?,
        })
    }
}
