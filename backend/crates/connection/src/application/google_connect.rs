//! Google Connect Use Case
//!
//! Links a Google identity to an existing local account. The caller
//! must prove ownership of the local account with email + password.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::models::{Email, RawPassword};

use crate::domain::entity::external_auth::{ExternalAuth, GOOGLE_PROVIDER};
use crate::domain::oauth::GoogleOAuth;
use crate::domain::repository::ExternalAuthRepository;
use crate::error::{ConnectionError, ConnectionResult};

/// Google connect input
pub struct GoogleConnectInput {
    pub code: String,
    pub redirect_uri: String,
    pub email: String,
    pub password: String,
}

/// Google connect use case
pub struct GoogleConnectUseCase<G, E, R>
where
    G: GoogleOAuth,
    E: ExternalAuthRepository,
    R: UserRepository,
{
    oauth: Arc<G>,
    links: Arc<E>,
    users: Arc<R>,
}

impl<G, E, R> GoogleConnectUseCase<G, E, R>
where
    G: GoogleOAuth,
    E: ExternalAuthRepository,
    R: UserRepository,
{
    pub fn new(oauth: Arc<G>, links: Arc<E>, users: Arc<R>) -> Self {
        Self {
            oauth,
            links,
            users,
        }
    }

    pub async fn execute(&self, input: GoogleConnectInput) -> ConnectionResult<ExternalAuth> {
        let email = Email::new(input.email).map_err(|_| ConnectionError::UserNotFound)?;

        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(ConnectionError::Auth)?
            .ok_or(ConnectionError::UserNotFound)?;

        let raw_password =
            RawPassword::new(input.password).map_err(|_| ConnectionError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password) {
            return Err(ConnectionError::InvalidCredentials);
        }

        let profile = self
            .oauth
            .fetch_profile(&input.code, &input.redirect_uri)
            .await?;

        if self
            .links
            .exists_by_provider_id(GOOGLE_PROVIDER, &profile.id)
            .await?
        {
            return Err(ConnectionError::AlreadyLinked);
        }

        let link = ExternalAuth::new_google(profile.id, user.user_id);
        self.links.create(&link).await?;

        tracing::info!(user_id = %user.user_id, "Google account linked");

        Ok(link)
    }
}
