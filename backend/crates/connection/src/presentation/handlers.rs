//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::application::tokens::{TokenPair, TokenService};
use auth::domain::repository::UserRepository;
use auth::models::TokenPairResponse;

use crate::application::{
    GoogleConnectInput, GoogleConnectUseCase, GoogleSignInInput, GoogleSignInUseCase,
};
use crate::domain::oauth::GoogleOAuth;
use crate::domain::repository::ExternalAuthRepository;
use crate::error::ConnectionResult;
use crate::presentation::dto::{GoogleConnectRequest, GoogleSignInRequest, LinkResponse};

/// Shared state for connection handlers
#[derive(Clone)]
pub struct ConnectionAppState<G, E, R>
where
    G: GoogleOAuth + Clone + Send + Sync + 'static,
    E: ExternalAuthRepository + Clone + Send + Sync + 'static,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub oauth: Arc<G>,
    pub links: Arc<E>,
    pub users: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Google Sign In
// ============================================================================

/// POST /api/auth/google/signin
pub async fn google_sign_in<G, E, R>(
    State(state): State<ConnectionAppState<G, E, R>>,
    Json(req): Json<GoogleSignInRequest>,
) -> ConnectionResult<impl IntoResponse>
where
    G: GoogleOAuth + Clone + Send + Sync + 'static,
    E: ExternalAuthRepository + Clone + Send + Sync + 'static,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = GoogleSignInUseCase::new(
        state.oauth.clone(),
        state.links.clone(),
        state.users.clone(),
        state.tokens.clone(),
    );

    let pair = use_case
        .execute(GoogleSignInInput {
            code: req.code,
            redirect_uri: req.redirect_uri,
        })
        .await?;

    Ok(token_pair_response(&state.config, pair, StatusCode::OK))
}

// ============================================================================
// Google Connect
// ============================================================================

/// POST /api/auth/google/connect
pub async fn google_connect<G, E, R>(
    State(state): State<ConnectionAppState<G, E, R>>,
    Json(req): Json<GoogleConnectRequest>,
) -> ConnectionResult<impl IntoResponse>
where
    G: GoogleOAuth + Clone + Send + Sync + 'static,
    E: ExternalAuthRepository + Clone + Send + Sync + 'static,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        GoogleConnectUseCase::new(state.oauth.clone(), state.links.clone(), state.users.clone());

    let link = use_case
        .execute(GoogleConnectInput {
            code: req.code,
            redirect_uri: req.redirect_uri,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse {
            provider: link.provider,
            provider_id: link.provider_id,
            user_id: link.user_id.to_string(),
        }),
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Token pair response with both cookies, same shape as the auth routes
fn token_pair_response(
    config: &AuthConfig,
    pair: TokenPair,
    status: StatusCode,
) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    config
        .access_cookie()
        .append_set_cookie(&mut headers, &pair.access_token);
    config
        .refresh_cookie()
        .append_set_cookie(&mut headers, &pair.refresh_token);

    (
        status,
        headers,
        Json(TokenPairResponse {
            jwt_access_token: pair.access_token,
            jwt_refresh_token: pair.refresh_token,
        }),
    )
        .into_response()
}
