//! Translation of driven-port failures into domain errors.

use serde_json::json;
use tracing::error;

use super::Error;
use super::ports::{
    CredentialHashError, RecordPersistenceError, TokenIssueError, UserPersistenceError,
};

/// Record store failures surface as internal errors; the detail goes to logs.
pub(crate) fn map_record_store_error(kind: &'static str, err: RecordPersistenceError) -> Error {
    error!(record_kind = kind, error = %err, "record store failed");
    Error::internal(format!("{kind} store error: {err}"))
}

pub(crate) fn map_user_store_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::invalid_request("User already exists").with_details(json!({ "field": "email" }))
        }
        other => {
            error!(error = %other, "user store failed");
            Error::internal(format!("user store error: {other}"))
        }
    }
}

pub(crate) fn map_hash_error(err: CredentialHashError) -> Error {
    error!(error = %err, "credential hashing failed");
    Error::internal(err.to_string())
}

pub(crate) fn map_token_error(err: TokenIssueError) -> Error {
    error!(error = %err, "session token signing failed");
    Error::internal(err.to_string())
}
