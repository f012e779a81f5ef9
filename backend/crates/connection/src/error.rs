//! Connection Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Connection-specific result type alias
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Connection-specific error variants
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// No local account for the given email
    #[error("User does not exist")]
    UserNotFound,

    /// Wrong local password during linking
    #[error("Password invalid")]
    InvalidCredentials,

    /// Google identity has no link to a local account
    #[error("Access Denied")]
    AccountNotLinked,

    /// Google identity is already linked
    #[error("Google account already linked")]
    AlreadyLinked,

    /// Code exchange or profile fetch with Google failed
    #[error("Google authentication failed: {0}")]
    OAuthExchange(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Error surfaced from the auth crate (token issuance, persistence)
    #[error(transparent)]
    Auth(#[from] auth::AuthError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConnectionError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConnectionError::UserNotFound | ConnectionError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ConnectionError::AccountNotLinked => StatusCode::FORBIDDEN,
            ConnectionError::AlreadyLinked => StatusCode::CONFLICT,
            ConnectionError::OAuthExchange(_) => StatusCode::UNAUTHORIZED,
            ConnectionError::Auth(e) => e.status_code(),
            // A duplicate provider id racing past the exists check hits the
            // unique constraint and stays a 409
            ConnectionError::Database(e) => {
                StatusCode::from_u16(classify_sqlx_error(e).0.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ConnectionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectionError::UserNotFound | ConnectionError::InvalidCredentials => {
                ErrorKind::BadRequest
            }
            ConnectionError::AccountNotLinked => ErrorKind::Forbidden,
            ConnectionError::AlreadyLinked => ErrorKind::Conflict,
            ConnectionError::OAuthExchange(_) => ErrorKind::Unauthorized,
            ConnectionError::Auth(e) => e.kind(),
            ConnectionError::Database(e) => classify_sqlx_error(e).0,
            ConnectionError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            // The raw sqlx message stays out of the response body
            ConnectionError::Database(e) => {
                let (kind, message) = classify_sqlx_error(e);
                AppError::new(kind, message)
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ConnectionError::Database(e) => {
                if classify_sqlx_error(e).0.is_server_error() {
                    tracing::error!(error = %e, "Connection database error");
                } else {
                    tracing::warn!(error = %e, "Connection database constraint error");
                }
            }
            ConnectionError::Internal(msg) => {
                tracing::error!(message = %msg, "Connection internal error");
            }
            ConnectionError::OAuthExchange(msg) => {
                tracing::warn!(message = %msg, "Google code exchange failed");
            }
            ConnectionError::AccountNotLinked => {
                tracing::warn!("Sign-in attempt from unlinked Google account");
            }
            _ => {
                tracing::debug!(error = %self, "Connection error");
            }
        }
    }
}

impl IntoResponse for ConnectionError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
