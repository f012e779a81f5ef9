//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and mail implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User signup/signin with email + password
//! - Stateless access tokens, rotating refresh tokens (JWT, HS256)
//! - Password reset via emailed single-use token
//! - Token cookies mirrored alongside the JSON response
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Only the Argon2id hash of the current refresh token is stored;
//!   rotation rejects stale or reused tokens
//! - Logout revokes the refresh token server-side
//! - Reset tokens are signed with the user's current password hash,
//!   so changing the password invalidates outstanding links

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::tokens::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::mailer::AnyResetMailer;
pub use infra::postgres::PgUserRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
