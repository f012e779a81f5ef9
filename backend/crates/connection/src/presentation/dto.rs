//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Google sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignInRequest {
    /// Authorization code from the OAuth redirect
    pub code: String,
    pub redirect_uri: String,
}

/// Google connect request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleConnectRequest {
    pub code: String,
    pub redirect_uri: String,
    /// Local account credentials proving ownership
    pub email: String,
    pub password: String,
}

/// Created link response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub provider: String,
    pub provider_id: String,
    pub user_id: String,
}
