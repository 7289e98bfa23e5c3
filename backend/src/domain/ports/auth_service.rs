//! Driving port for the credential issuer.
//!
//! Inbound adapters call it to register and log in without knowing how
//! accounts are stored or how tokens are signed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, RegistrationDetails, SessionToken};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and return a token bound to it.
    ///
    /// Fails with an `invalid_request` error when the email is already
    /// registered.
    async fn register(&self, details: RegistrationDetails) -> Result<SessionToken, Error>;

    /// Verify credentials and return a token.
    ///
    /// Unknown emails and wrong passwords produce the same `unauthorized`
    /// error.
    async fn login(&self, credentials: LoginCredentials) -> Result<SessionToken, Error>;
}
