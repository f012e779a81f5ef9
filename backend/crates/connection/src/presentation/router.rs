//! Connection Router

use axum::{Router, routing::post};
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::application::tokens::TokenService;
use auth::domain::repository::UserRepository;
use auth::infra::postgres::PgUserRepository;

use crate::domain::oauth::GoogleOAuth;
use crate::domain::repository::ExternalAuthRepository;
use crate::infra::google::GoogleOAuthClient;
use crate::infra::postgres::PgExternalAuthRepository;
use crate::presentation::handlers::{self, ConnectionAppState};

/// Create the Connection router with PostgreSQL repositories
pub fn connection_router(
    oauth: GoogleOAuthClient,
    links: PgExternalAuthRepository,
    users: PgUserRepository,
    config: AuthConfig,
) -> Router {
    connection_router_generic(oauth, links, users, config)
}

/// Create a generic Connection router for any implementations
pub fn connection_router_generic<G, E, R>(
    oauth: G,
    links: E,
    users: R,
    config: AuthConfig,
) -> Router
where
    G: GoogleOAuth + Clone + Send + Sync + 'static,
    E: ExternalAuthRepository + Clone + Send + Sync + 'static,
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let tokens = Arc::new(TokenService::new(config.clone()));

    let state = ConnectionAppState {
        oauth: Arc::new(oauth),
        links: Arc::new(links),
        users: Arc::new(users),
        tokens,
        config,
    };

    Router::new()
        .route("/signin", post(handlers::google_sign_in::<G, E, R>))
        .route("/connect", post(handlers::google_connect::<G, E, R>))
        .with_state(state)
}
