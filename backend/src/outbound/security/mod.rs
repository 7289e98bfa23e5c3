//! Credential adapters: session-token signing and password hashing.

mod argon2_hasher;
mod jwt_tokens;

pub use argon2_hasher::Argon2CredentialHasher;
pub use jwt_tokens::JwtSessionTokens;
