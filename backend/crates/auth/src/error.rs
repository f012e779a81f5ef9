//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user for the given email or id
    #[error("User does not exist")]
    UserNotFound,

    /// Email already registered
    #[error("User already exists")]
    EmailTaken,

    /// Wrong password
    #[error("Password invalid")]
    InvalidCredentials,

    /// Refresh token reuse, revoked session or missing link
    #[error("Access Denied")]
    AccessDenied,

    /// Token failed signature or expiry checks
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// New password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password policy violation
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Email / display name validation error
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Reset mail could not be delivered
    #[error("Failed to send reset email")]
    MailDelivery,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Signin/forgot-password report lookup and password failures
            // as 400, matching the public API contract
            AuthError::UserNotFound | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::AccessDenied | AuthError::MailDelivery => StatusCode::FORBIDDEN,
            AuthError::TokenInvalid => StatusCode::UNAUTHORIZED,
            AuthError::PasswordMismatch
            | AuthError::PasswordValidation(_)
            | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            // Constraint violations keep their client-error status, so a
            // unique-email race during signup surfaces as 409
            AuthError::Database(e) => StatusCode::from_u16(classify_sqlx_error(e).0.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound
            | AuthError::InvalidCredentials
            | AuthError::PasswordMismatch
            | AuthError::PasswordValidation(_)
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::AccessDenied | AuthError::MailDelivery => ErrorKind::Forbidden,
            AuthError::TokenInvalid => ErrorKind::Unauthorized,
            AuthError::Database(e) => classify_sqlx_error(e).0,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            // The raw sqlx message stays out of the response body
            AuthError::Database(e) => {
                let (kind, message) = classify_sqlx_error(e);
                AppError::new(kind, message)
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                if classify_sqlx_error(e).0.is_server_error() {
                    tracing::error!(error = %e, "Auth database error");
                } else {
                    tracing::warn!(error = %e, "Auth database constraint error");
                }
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::MailDelivery => {
                tracing::error!("Reset mail delivery failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccessDenied => {
                tracing::warn!("Refresh token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
