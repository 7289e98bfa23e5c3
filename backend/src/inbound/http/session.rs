//! Token-authenticated caller extraction.
//!
//! Handlers that take an [`AuthenticatedUser`] only run once the token gate
//! admits the request. The token is read from `x-auth-token`, falling back
//! to `Authorization: Bearer`.

use actix_web::http::header::{AUTHORIZATION, AsHeaderName, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use super::state::HttpState;
use crate::domain::{Error, UserId, verify_presented_token};

/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";
const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, proven by a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

fn header_text(headers: &HeaderMap, name: impl AsHeaderName) -> Option<&str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Pick the presented token. `x-auth-token` wins when both are sent.
pub(crate) fn presented_token(headers: &HeaderMap) -> Option<&str> {
    header_text(headers, AUTH_TOKEN_HEADER).or_else(|| {
        header_text(headers, AUTHORIZATION)
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
    })
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let user = verify_presented_token(state.tokens.as_ref(), presented_token(req.headers()))?;
    Ok(AuthenticatedUser(user))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
