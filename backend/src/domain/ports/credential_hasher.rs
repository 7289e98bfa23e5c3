//! Driven port for salted password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures from the hashing backend.
    pub enum CredentialHashError {
        /// Hashing or parsing a stored hash failed.
        Backend { message: String } => backend, "credential hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHashError>;

    /// Check `password` against a stored hash.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHashError>;

    /// Spend the same effort as [`CredentialHasher::verify`] without a stored
    /// hash, so unknown accounts cost as much as wrong passwords.
    fn verify_dummy(&self, password: &str);
}
