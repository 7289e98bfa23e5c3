//! Credential issuer: registration and login.
//!
//! Password hashing is CPU bound, so it runs on the blocking pool rather than
//! on the async executor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use zeroize::Zeroizing;

use super::ports::{
    AuthService, CredentialHasher, SessionTokens, UserPersistenceError, UserRepository,
};
use super::store_errors::{map_hash_error, map_token_error, map_user_store_error};
use super::{Error, LoginCredentials, RegistrationDetails, SessionToken, UserAccount, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Credential issuer implementing [`AuthService`].
#[derive(Clone)]
pub struct CredentialIssuer<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<dyn SessionTokens>,
}

impl<U, H> CredentialIssuer<U, H> {
    /// Create an issuer over the given account store, hasher, and signer.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<dyn SessionTokens>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H> CredentialIssuer<U, H>
where
    U: UserRepository,
    H: CredentialHasher + 'static,
{
    async fn with_hasher<T, F>(&self, job: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&H) -> T + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || job(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("credential hashing task failed: {err}")))
    }

    fn issue(&self, user: &UserId) -> Result<SessionToken, Error> {
        self.tokens.issue(user).map_err(map_token_error)
    }
}

#[async_trait]
impl<U, H> AuthService for CredentialIssuer<U, H>
where
    U: UserRepository,
    H: CredentialHasher + 'static,
{
    async fn register(&self, details: RegistrationDetails) -> Result<SessionToken, Error> {
        if self
            .users
            .find_by_email(details.email())
            .await
            .map_err(map_user_store_error)?
            .is_some()
        {
            return Err(map_user_store_error(UserPersistenceError::duplicate_email(
                details.email().as_ref(),
            )));
        }

        let password = Zeroizing::new(details.password().to_owned());
        let hash = self
            .with_hasher(move |hasher| hasher.hash(&password))
            .await?
            .map_err(map_hash_error)?;
        let account = UserAccount::new(
            UserId::random(),
            details.username().clone(),
            details.email().clone(),
            hash,
        );
        self.users
            .insert(&account)
            .await
            .map_err(map_user_store_error)?;

        info!(user_id = %account.id(), "user registered");
        self.issue(account.id())
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<SessionToken, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_store_error)?;
        let password = Zeroizing::new(credentials.password().to_owned());

        let Some(account) = account else {
            self.with_hasher(move |hasher| hasher.verify_dummy(&password))
                .await?;
            warn!("login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let stored = account.password_hash().clone();
        let matches = self
            .with_hasher(move |hasher| hasher.verify(&password, &stored))
            .await?
            .map_err(map_hash_error)?;
        if !matches {
            warn!("login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %account.id(), "user logged in");
        self.issue(account.id())
    }
}

#[cfg(test)]
mod tests;
