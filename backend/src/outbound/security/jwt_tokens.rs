//! HS256 JWT implementation of the `SessionTokens` port.
//!
//! Tokens carry the user id as `sub` plus `iat`/`exp`. Verification checks
//! the signature and expiry only; nothing is stored server side.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SessionTokens, TokenIssueError};
use crate::domain::{SessionToken, TokenRejection, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// JWT signer and verifier.
#[derive(Clone)]
pub struct JwtSessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl JwtSessionTokens {
    /// Build a signer from `secret` issuing tokens that live for `ttl`.
    ///
    /// The keys copy the secret, so callers may zeroize their buffer
    /// afterwards.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, user: &UserId) -> Result<SessionToken, TokenIssueError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(SessionToken::new)
            .map_err(|err| TokenIssueError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenRejection> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenRejection::Invalid)?;
        UserId::parse(&data.claims.sub).map_err(|_| TokenRejection::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[fixture]
    fn tokens() -> JwtSessionTokens {
        JwtSessionTokens::new(SECRET, Duration::from_secs(3600))
    }

    #[rstest]
    fn verify_returns_issuing_identity(tokens: JwtSessionTokens) {
        let user = UserId::random();
        let token = tokens.issue(&user).expect("issue");
        assert_eq!(tokens.verify(token.as_str()), Ok(user));
    }

    #[rstest]
    fn token_from_other_secret_is_invalid(tokens: JwtSessionTokens) {
        let other = JwtSessionTokens::new(&[1; 32], Duration::from_secs(3600));
        let token = other.issue(&UserId::random()).expect("issue");
        assert_eq!(tokens.verify(token.as_str()), Err(TokenRejection::Invalid));
    }

    #[rstest]
    fn expired_token_is_invalid(tokens: JwtSessionTokens) {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: UserId::random().to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let stale = encode(&Header::new(Algorithm::HS256), &claims, &tokens.encoding_key)
            .expect("encode");
        assert_eq!(tokens.verify(&stale), Err(TokenRejection::Invalid));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-jwt")]
    #[case("a.b.c")]
    fn malformed_token_is_invalid(tokens: JwtSessionTokens, #[case] raw: &str) {
        assert_eq!(tokens.verify(raw), Err(TokenRejection::Invalid));
    }

    #[rstest]
    fn non_uuid_subject_is_invalid(tokens: JwtSessionTokens) {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "alice".into(),
            iat: now,
            exp: now + 60,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &tokens.encoding_key)
            .expect("encode");
        assert_eq!(tokens.verify(&token), Err(TokenRejection::Invalid));
    }
}
