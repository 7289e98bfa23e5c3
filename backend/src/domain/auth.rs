//! Authentication primitives: login and registration inputs, session tokens,
//! and the reasons a presented token can be turned away.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{Email, UserValidationError, Username};

/// Domain error returned when login or registration payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Username or email failed validation.
    Identity(UserValidationError),
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity(err) => fmt::Display::fmt(err, f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<UserValidationError> for AuthValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Identity(value)
    }
}

fn require_password(password: &str) -> Result<Zeroizing<String>, AuthValidationError> {
    if password.is_empty() {
        return Err(AuthValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials used by the credential issuer.
///
/// ## Invariants
/// - `email` is normalised (see [`Email`]).
/// - `password` is non-empty but retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use clarity::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Alice@X.com", "pw1").unwrap();
/// assert_eq!(creds.email().as_ref(), "alice@x.com");
/// assert_eq!(creds.password(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: require_password(password)?,
        })
    }

    /// Normalised login key.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    username: Username,
    email: Email,
    password: Zeroizing<String>,
}

impl RegistrationDetails {
    /// Construct registration details from raw inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            email: Email::new(email)?,
            password: require_password(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signed credential handed to clients after login or registration.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded form sent to the client.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper, yielding the encoded form.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Why the token gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// No token was supplied.
    Missing,
    /// The token was malformed, forged, or expired.
    Invalid,
}

impl TokenRejection {
    /// Client-facing message for the rejection.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Missing => "No token, authorization denied",
            Self::Invalid => "Token is not valid",
        }
    }
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for TokenRejection {}

impl From<TokenRejection> for super::Error {
    fn from(value: TokenRejection) -> Self {
        Self::unauthorized(value.message())
    }
}
