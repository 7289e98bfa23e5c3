//! Session-token signing secret loading and validation.
//!
//! The secret is read once at start-up from the file named by
//! `TOKEN_SECRET_FILE`. Release builds insist on a real secret of adequate
//! length; debug builds may fall back to a random per-process secret, which
//! invalidates every token on restart.

use std::fmt;
use std::path::{Path, PathBuf};

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroizing;

pub const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
pub const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
pub const SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
/// Minimum secret length accepted by release builds (HS256 block size).
pub const SECRET_MIN_LEN: usize = 32;
const FINGERPRINT_BYTES: usize = 8;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate short or missing secrets with a warning.
    Debug,
    /// Release builds require a readable secret of at least
    /// [`SECRET_MIN_LEN`] bytes.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clarity::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Where the active secret came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SecretSource {
    File(PathBuf),
    Ephemeral,
}

/// Signing secret held for the lifetime of the process.
///
/// The bytes are zeroized on drop and never printed; [`fmt::Debug`] shows
/// the fingerprint instead.
#[derive(Clone)]
pub struct TokenSecret {
    bytes: Zeroizing<Vec<u8>>,
    source: SecretSource,
}

impl TokenSecret {
    /// Wrap raw secret bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>, source: SecretSource) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
            source,
        }
    }

    /// Generate a random secret for development use.
    #[must_use]
    pub fn ephemeral() -> Self {
        let mut bytes = vec![0_u8; SECRET_MIN_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self::new(bytes, SecretSource::Ephemeral)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn source(&self) -> &SecretSource {
        &self.source
    }

    /// Truncated SHA-256 of the secret as lowercase hex.
    ///
    /// Safe to log; operators compare it across replicas to confirm they
    /// share one secret.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clarity::inbound::http::token_config::{SecretSource, TokenSecret};
    ///
    /// let secret = TokenSecret::new(vec![b'a'; 32], SecretSource::Ephemeral);
    /// let fp = secret.fingerprint();
    /// assert_eq!(fp.len(), 16);
    /// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes.as_slice());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecret")
            .field("fingerprint", &self.fingerprint())
            .field("source", &self.source)
            .finish()
    }
}

/// Errors raised while loading the signing secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed and no fallback is allowed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file is shorter than the build mode accepts.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not run with a random secret.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Load the signing secret from the environment and build mode.
///
/// Debug builds fall back to [`TokenSecret::ephemeral`] when the file is
/// unreadable unless `TOKEN_ALLOW_EPHEMERAL=0`. Release builds never do.
///
/// # Examples
///
/// ```rust
/// use clarity::inbound::http::token_config::{BuildMode, token_secret_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = tempfile::NamedTempFile::new()?;
/// std::fs::write(file.path(), vec![b'a'; 32])?;
/// let path = file.path().to_string_lossy().into_owned();
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_SECRET_FILE" => Some(path.clone()),
///     _ => None,
/// });
///
/// let secret = token_secret_from_env(&env, BuildMode::Release)?;
/// assert_eq!(secret.len(), 32);
/// # Ok(())
/// # }
/// ```
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| SECRET_DEFAULT_PATH.to_owned()),
    );

    let secret = match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            check_length(&path, bytes.len(), mode)?;
            TokenSecret::new(bytes.to_vec(), SecretSource::File(path))
        }
        Err(error) if allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary token secret (dev only); tokens will not survive a restart"
            );
            TokenSecret::ephemeral()
        }
        Err(error) => {
            return Err(TokenConfigError::SecretRead {
                path,
                source: error,
            });
        }
    };

    info!(
        fingerprint = %secret.fingerprint(),
        ephemeral = matches!(secret.source(), SecretSource::Ephemeral),
        "token signing secret loaded"
    );
    Ok(secret)
}

fn check_length(path: &Path, length: usize, mode: BuildMode) -> Result<(), TokenConfigError> {
    if length >= SECRET_MIN_LEN {
        return Ok(());
    }
    if mode.is_debug() && length > 0 {
        warn!(
            path = %path.display(),
            length,
            min_len = SECRET_MIN_LEN,
            "token secret shorter than recommended"
        );
        return Ok(());
    }
    Err(TokenConfigError::SecretTooShort {
        path: path.to_path_buf(),
        length,
        min_len: SECRET_MIN_LEN,
    })
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(mode.is_debug());
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(TokenConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; allowing in debug build");
            Ok(true)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
