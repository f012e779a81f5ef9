//! Auth Middleware
//!
//! Access token guard for protected routes. Reads the token cookie
//! first, then falls back to the Authorization bearer header, matching
//! how the tokens are delivered to browser and non-browser clients.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::ACCESS_TOKEN_COOKIE;
use crate::application::tokens::TokenService;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub tokens: Arc<TokenService>,
}

/// Pull the access token out of the cookie or the bearer header
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    platform::cookie::extract_cookie(headers, ACCESS_TOKEN_COOKIE)
        .or_else(|| platform::cookie::extract_bearer(headers))
}

/// Middleware that requires a valid access token.
/// Verified claims are stored in request extensions for handlers.
pub async fn require_access_token(
    State(state): State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_access_token(req.headers())
        .ok_or_else(|| AuthError::TokenInvalid.into_response())?;

    let claims = state
        .tokens
        .verify_access(&token)
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_extract_prefers_cookie_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "JWT_ACCESS_TOKEN=from_cookie".parse().unwrap(),
        );
        headers.insert(header::AUTHORIZATION, "Bearer from_header".parse().unwrap());

        assert_eq!(
            extract_access_token(&headers),
            Some("from_cookie".to_string())
        );
    }

    #[test]
    fn test_extract_falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer from_header".parse().unwrap());

        assert_eq!(
            extract_access_token(&headers),
            Some("from_header".to_string())
        );
    }

    #[test]
    fn test_extract_none_when_absent() {
        assert_eq!(extract_access_token(&HeaderMap::new()), None);
    }
}
