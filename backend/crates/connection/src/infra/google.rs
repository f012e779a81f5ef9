//! Google OAuth Client
//!
//! Authorization-code exchange against Google's endpoints: POST the
//! code to the token endpoint, then fetch the profile from userinfo
//! with the returned access token.

use serde::Deserialize;

use crate::application::config::GoogleConfig;
use crate::domain::oauth::{GoogleOAuth, GoogleProfile};
use crate::error::{ConnectionError, ConnectionResult};

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google OAuth client backed by reqwest
#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleOAuthClient {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

impl GoogleOAuth for GoogleOAuthClient {
    async fn fetch_profile(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> ConnectionResult<GoogleProfile> {
        let response = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", &self.config.client_id),
                ("client_secret", &self.config.client_secret),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| ConnectionError::OAuthExchange(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ConnectionError::OAuthExchange(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ConnectionError::OAuthExchange(e.to_string()))?;

        let response = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| ConnectionError::OAuthExchange(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ConnectionError::OAuthExchange(format!(
                "userinfo endpoint returned {}",
                response.status()
            )));
        }

        response
            .json::<GoogleProfile>()
            .await
            .map_err(|e| ConnectionError::OAuthExchange(e.to_string()))
    }
}
