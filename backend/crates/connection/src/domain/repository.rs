//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::external_auth::ExternalAuth;
use crate::error::ConnectionResult;

/// External auth repository trait
#[trait_variant::make(ExternalAuthRepository: Send)]
pub trait LocalExternalAuthRepository {
    /// Create a new link
    async fn create(&self, link: &ExternalAuth) -> ConnectionResult<()>;

    /// Find a link by provider + subject id
    async fn find_by_provider_id(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> ConnectionResult<Option<ExternalAuth>>;

    /// Check if a link exists for provider + subject id
    async fn exists_by_provider_id(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> ConnectionResult<bool>;
}
