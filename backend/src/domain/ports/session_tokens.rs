//! Driven port for issuing and checking signed session tokens.
//!
//! Implementations are stateless: a token is valid when its signature and
//! expiry check out. There is no revocation list.

use crate::domain::{SessionToken, TokenRejection, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures while minting a token.
    pub enum TokenIssueError {
        /// Signing failed.
        Signing { message: String } => signing, "failed to sign session token: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionTokens: Send + Sync {
    /// Mint a token bound to `user`.
    fn issue(&self, user: &UserId) -> Result<SessionToken, TokenIssueError>;

    /// Check a presented token and return the identity bound inside it.
    ///
    /// Implementations only ever return [`TokenRejection::Invalid`]; the
    /// missing case is decided before a token reaches the port.
    fn verify(&self, token: &str) -> Result<UserId, TokenRejection>;
}
