//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a sqlx error into an [`ErrorKind`] and a user-facing message.
///
/// Exposed so domain error enums that wrap `sqlx::Error` can report the
/// same status a direct [`AppError`] conversion would. Constraint
/// violations in particular must keep their client-error semantics:
/// a unique-index hit during a check-then-insert race is a 409, not a 500.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx_error(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut => (
            ErrorKind::ServiceUnavailable,
            "Database connection pool exhausted",
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL error codes
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                // Class 23 — Integrity Constraint Violation
                Some("23502") => (ErrorKind::BadRequest, "Required field is null"),
                Some("23503") => (ErrorKind::Conflict, "Foreign key violation"),
                Some("23505") => (ErrorKind::Conflict, "Duplicate key value"),
                Some("23514") => (ErrorKind::BadRequest, "Check constraint violation"),
                // Class 53 — Insufficient Resources
                Some("53000" | "53100" | "53200" | "53300") => (
                    ErrorKind::ServiceUnavailable,
                    "Database resource exhausted",
                ),
                // Class 57 — Operator Intervention
                Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                    (ErrorKind::ServiceUnavailable, "Database unavailable")
                }
                _ => (ErrorKind::InternalServerError, "Database error"),
            }
        }
        sqlx::Error::Io(_) => (
            ErrorKind::ServiceUnavailable,
            "Database connection error",
        ),
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx_error(&err);
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_classify_sqlx_errors() {
        let (kind, _) = classify_sqlx_error(&sqlx::Error::RowNotFound);
        assert_eq!(kind, ErrorKind::NotFound);

        let (kind, _) = classify_sqlx_error(&sqlx::Error::PoolTimedOut);
        assert_eq!(kind, ErrorKind::ServiceUnavailable);

        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let (kind, _) = classify_sqlx_error(&sqlx::Error::Io(io_err));
        assert_eq!(kind, ErrorKind::ServiceUnavailable);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_error_conversion_keeps_kind() {
        let app_err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);
        assert_eq!(app_err.status_code(), 404);
    }
}
