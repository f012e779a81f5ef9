//! Connection (External Identity) Backend Module
//!
//! Links Google identities to local accounts and signs users in
//! through an existing link.
//!
//! Clean Architecture structure:
//! - `domain/` - External auth entity, repository and OAuth port
//! - `application/` - Use cases
//! - `infra/` - Database and Google client implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Google sign-in only works for accounts that were explicitly linked
//! - Linking requires the local email + password
//! - One local account per Google subject id (unique constraint)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::GoogleConfig;
pub use error::{ConnectionError, ConnectionResult};
pub use infra::google::GoogleOAuthClient;
pub use infra::postgres::PgExternalAuthRepository;
pub use presentation::router::connection_router;

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::oauth::GoogleProfile;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
