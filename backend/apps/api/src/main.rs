//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AnyResetMailer, AuthConfig, PgUserRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use connection::{GoogleConfig, GoogleOAuthClient, PgExternalAuthRepository, connection_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,connection=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        let mut config = AuthConfig::development();
        if let Ok(app_url) = env::var("APP_URL") {
            config.app_url = app_url;
        }
        config
    } else {
        // In production, load secrets from environment
        AuthConfig {
            access_token_secret: env::var("JWT_ACCESS_SECRET")
                .expect("JWT_ACCESS_SECRET must be set in production"),
            refresh_token_secret: env::var("JWT_REFRESH_SECRET")
                .expect("JWT_REFRESH_SECRET must be set in production"),
            forgot_password_secret: env::var("JWT_FORGOT_PASSWORD_SECRET")
                .expect("JWT_FORGOT_PASSWORD_SECRET must be set in production"),
            app_url: env::var("APP_URL").expect("APP_URL must be set in production"),
            ..AuthConfig::default()
        }
    };

    // Mailer: SMTP when configured, log-only otherwise
    let mailer = AnyResetMailer::from_env()?;

    // Google OAuth configuration
    let google_config = GoogleConfig::from_env().unwrap_or_else(|| {
        tracing::warn!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set, Google routes will fail");
        GoogleConfig::default()
    });

    let users = PgUserRepository::new(pool.clone());
    let links = PgExternalAuthRepository::new(pool.clone());
    let google = GoogleOAuthClient::new(google_config);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth_router(users.clone(), mailer, auth_config.clone()),
        )
        .nest(
            "/api/auth/google",
            connection_router(google, links, users, auth_config),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
