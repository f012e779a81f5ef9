//! Domain Layer
//!
//! External auth entity, repository trait, and the Google OAuth port.

pub mod entity;
pub mod oauth;
pub mod repository;

// Re-exports
pub use entity::external_auth::ExternalAuth;
pub use oauth::{GoogleOAuth, GoogleProfile};
pub use repository::ExternalAuthRepository;
