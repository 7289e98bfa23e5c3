//! Behaviour of the generated port error types.

use super::*;
use rstest::rstest;

#[rstest]
fn constructors_accept_borrowed_text() {
    let err = RecordPersistenceError::query("syntax error");
    assert_eq!(
        err,
        RecordPersistenceError::Query {
            message: "syntax error".to_owned()
        }
    );
}

#[rstest]
#[case(
    UserPersistenceError::connection("refused"),
    "user repository connection failed: refused"
)]
#[case(
    UserPersistenceError::duplicate_email("alice@x.com"),
    "email alice@x.com is already registered"
)]
#[case(
    UserPersistenceError::query("timeout"),
    "user repository query failed: timeout"
)]
fn user_errors_render_messages(#[case] err: UserPersistenceError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn token_issue_error_mentions_signing() {
    let err = TokenIssueError::signing("bad key");
    assert_eq!(err.to_string(), "failed to sign session token: bad key");
}

#[rstest]
fn credential_hash_error_renders_message() {
    let err = CredentialHashError::backend("salt too short");
    assert_eq!(err.to_string(), "credential hashing failed: salt too short");
}
