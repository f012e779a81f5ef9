//! Google Sign In Use Case
//!
//! Exchanges the authorization code, resolves the external-auth link,
//! and issues a token pair for the linked local account. Unlinked
//! Google identities are denied; linking is a separate, credentialed
//! operation.

use std::sync::Arc;

use auth::application::tokens::{TokenPair, TokenService};
use auth::domain::repository::UserRepository;

use crate::domain::entity::external_auth::GOOGLE_PROVIDER;
use crate::domain::oauth::GoogleOAuth;
use crate::domain::repository::ExternalAuthRepository;
use crate::error::{ConnectionError, ConnectionResult};

/// Google sign in input
pub struct GoogleSignInInput {
    pub code: String,
    pub redirect_uri: String,
}

/// Google sign in use case
pub struct GoogleSignInUseCase<G, E, R>
where
    G: GoogleOAuth,
    E: ExternalAuthRepository,
    R: UserRepository,
{
    oauth: Arc<G>,
    links: Arc<E>,
    users: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<G, E, R> GoogleSignInUseCase<G, E, R>
where
    G: GoogleOAuth,
    E: ExternalAuthRepository,
    R: UserRepository,
{
    pub fn new(oauth: Arc<G>, links: Arc<E>, users: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self {
            oauth,
            links,
            users,
            tokens,
        }
    }

    pub async fn execute(&self, input: GoogleSignInInput) -> ConnectionResult<TokenPair> {
        let profile = self
            .oauth
            .fetch_profile(&input.code, &input.redirect_uri)
            .await?;

        let link = self
            .links
            .find_by_provider_id(GOOGLE_PROVIDER, &profile.id)
            .await?
            .ok_or(ConnectionError::AccountNotLinked)?;

        let user = self
            .users
            .find_by_id(&link.user_id)
            .await
            .map_err(ConnectionError::Auth)?
            .ok_or(ConnectionError::AccountNotLinked)?;

        let pair = self.tokens.issue_pair(&user)?;
        super::store_refresh_hash(self.users.as_ref(), &user.user_id, &pair.refresh_token).await?;

        tracing::info!(user_id = %user.user_id, "User signed in via Google");

        Ok(pair)
    }
}
