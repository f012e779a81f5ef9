//! Auth Router

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::tokens::TokenService;
use crate::domain::mailer::ResetMailer;
use crate::domain::repository::UserRepository;
use crate::infra::mailer::AnyResetMailer;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_access_token};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, mailer: AnyResetMailer, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository/mailer implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: ResetMailer + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let tokens = Arc::new(TokenService::new(config.clone()));

    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        tokens: tokens.clone(),
        config,
    };

    let guarded = Router::new()
        .route("/email/logout", post(handlers::sign_out::<R, M>))
        .route("/email/user", get(handlers::current_user::<R, M>))
        .route_layer(axum_middleware::from_fn_with_state(
            AuthMiddlewareState { tokens },
            require_access_token,
        ));

    Router::new()
        .route("/email/signup", post(handlers::sign_up::<R, M>))
        .route("/email/signin", post(handlers::sign_in::<R, M>))
        .route(
            "/email/forgot-password",
            post(handlers::forgot_password::<R, M>),
        )
        .route(
            "/email/reset-password/{id}/{token}",
            get(handlers::reset_password_verify::<R, M>)
                .post(handlers::reset_password::<R, M>),
        )
        .route("/refresh", post(handlers::refresh::<R, M>))
        .merge(guarded)
        .with_state(state)
}
