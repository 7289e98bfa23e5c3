//! Token gate run before every protected handler.

use tracing::debug;

use super::ports::SessionTokens;
use super::{TokenRejection, UserId};

/// Decide whether a presented token admits the request.
///
/// Absent or blank tokens are [`TokenRejection::Missing`]; anything the
/// signer refuses is [`TokenRejection::Invalid`]. The check is stateless.
pub fn verify_presented_token(
    tokens: &dyn SessionTokens,
    presented: Option<&str>,
) -> Result<UserId, TokenRejection> {
    let token = presented
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(TokenRejection::Missing)?;
    tokens.verify(token).inspect_err(|rejection| {
        debug!(reason = ?rejection, "session token rejected");
    })
}
