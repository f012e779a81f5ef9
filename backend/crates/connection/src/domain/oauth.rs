//! Google OAuth Port
//!
//! Interface for the authorization-code exchange. Implementation is in
//! the infrastructure layer; use cases stay testable without network.

use serde::Deserialize;

use crate::error::ConnectionResult;

/// Profile returned by Google's userinfo endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Google subject id
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Google OAuth port
#[trait_variant::make(GoogleOAuth: Send)]
pub trait LocalGoogleOAuth {
    /// Exchange an authorization code for the user's Google profile
    async fn fetch_profile(&self, code: &str, redirect_uri: &str)
    -> ConnectionResult<GoogleProfile>;
}
