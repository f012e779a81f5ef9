//! External Auth Entity
//!
//! Binds an external identity (provider + subject id) to a local user.
//! Google sign-in only works once such a link exists.

use auth::models::UserId;
use chrono::{DateTime, Utc};

/// Provider name used for Google links
pub const GOOGLE_PROVIDER: &str = "google";

/// External auth link entity
#[derive(Debug, Clone)]
pub struct ExternalAuth {
    /// Provider name ("google")
    pub provider: String,
    /// Provider-side subject id (unique)
    pub provider_id: String,
    /// Linked local user
    pub user_id: UserId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl ExternalAuth {
    /// Create a new Google link
    pub fn new_google(provider_id: impl Into<String>, user_id: UserId) -> Self {
        Self {
            provider: GOOGLE_PROVIDER.to_string(),
            provider_id: provider_id.into(),
            user_id,
            created_at: Utc::now(),
        }
    }
}
