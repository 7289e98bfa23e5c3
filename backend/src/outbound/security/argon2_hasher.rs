//! Argon2id implementation of the `CredentialHasher` port.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString,
};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

const SALT_LEN: usize = 16;

/// Argon2id hasher with the crate's default cost parameters.
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
    /// Hash of a throwaway password, checked when an account does not exist.
    dummy: String,
}

impl Argon2CredentialHasher {
    /// Build a hasher and precompute the dummy hash.
    pub fn new() -> Result<Self, CredentialHashError> {
        let argon2 = Argon2::default();
        let dummy = hash_with(&argon2, "clarity-dummy-password")?;
        Ok(Self { argon2, dummy })
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, CredentialHashError> {
    let mut salt_bytes = [0_u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|err| CredentialHashError::backend(err.to_string()))?;
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CredentialHashError::backend(err.to_string()))
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHashError> {
        hash_with(&self.argon2, password).map(PasswordHash::from_encoded)
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHashError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| CredentialHashError::backend(err.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn verify_dummy(&self, password: &str) {
        if let Ok(parsed) = PhcHash::new(&self.dummy) {
            let _ = self.argon2.verify_password(password.as_bytes(), &parsed);
        }
    }
}
