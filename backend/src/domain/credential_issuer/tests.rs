//! Tests for the credential issuer.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    CredentialHashError, MockCredentialHasher, MockSessionTokens, MockUserRepository,
};
use crate::domain::{Email, ErrorCode, PasswordHash, TokenRejection, Username};
use rstest::rstest;

fn account(email: &str) -> UserAccount {
    UserAccount::new(
        UserId::random(),
        Username::new("alice").expect("username"),
        Email::new(email).expect("email"),
        PasswordHash::from_encoded("$argon2id$stored"),
    )
}

fn signer_for_any_user() -> MockSessionTokens {
    let mut tokens = MockSessionTokens::new();
    tokens
        .expect_issue()
        .returning(|user| Ok(SessionToken::new(format!("token-for-{user}"))));
    tokens
        .expect_verify()
        .returning(|_| Err(TokenRejection::Invalid));
    tokens
}

fn issuer(
    users: MockUserRepository,
    hasher: MockCredentialHasher,
    tokens: MockSessionTokens,
) -> CredentialIssuer<MockUserRepository, MockCredentialHasher> {
    CredentialIssuer::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
}

fn registration() -> RegistrationDetails {
    RegistrationDetails::try_from_parts("alice", "alice@x.com", "pw1").expect("valid details")
}

fn login(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("alice@x.com", password).expect("valid credentials")
}

#[tokio::test]
async fn register_hashes_and_issues_token_for_new_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|account| {
            account.email().as_ref() == "alice@x.com"
                && account.password_hash().as_str() == "hashed:pw1"
        })
        .times(1)
        .return_once(|_| Ok(()));
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_hash()
        .return_once(|password| Ok(PasswordHash::from_encoded(format!("hashed:{password}"))));

    let token = issuer(users, hasher, signer_for_any_user())
        .register(registration())
        .await
        .expect("registration succeeds");

    assert!(token.as_str().starts_with("token-for-"));
}

#[tokio::test]
async fn register_rejects_existing_email_without_hashing() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(|_| Ok(Some(account("alice@x.com"))));
    users.expect_insert().never();
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_hash().never();

    let err = issuer(users, hasher, signer_for_any_user())
        .register(registration())
        .await
        .expect_err("duplicate rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "User already exists");
}

#[tokio::test]
async fn register_surfaces_insert_race_as_duplicate() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users
        .expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate_email("alice@x.com")));
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::from_encoded("h")));

    let err = issuer(users, hasher, signer_for_any_user())
        .register(registration())
        .await
        .expect_err("duplicate rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn register_reports_hash_backend_failure_as_internal() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    users.expect_insert().never();
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(CredentialHashError::backend("rng unavailable")));

    let err = issuer(users, hasher, signer_for_any_user())
        .register(registration())
        .await
        .expect_err("hash failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn login_checks_password(#[case] password_matches: bool) {
    let stored = account("alice@x.com");
    let user_id = *stored.id();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(stored)));
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_verify()
        .return_once(move |_, _| Ok(password_matches));
    hasher.expect_verify_dummy().never();

    let result = issuer(users, hasher, signer_for_any_user())
        .login(login("pw1"))
        .await;

    match (password_matches, result) {
        (true, Ok(token)) => assert_eq!(token.as_str(), format!("token-for-{user_id}")),
        (false, Err(err)) => {
            assert_eq!(err.code(), ErrorCode::Unauthorized);
            assert_eq!(err.message(), "invalid credentials");
        }
        (expected, other) => panic!("expected success={expected}, got {other:?}"),
    }
}

#[tokio::test]
async fn login_for_unknown_email_spends_dummy_verification() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().return_once(|_| Ok(None));
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_verify_dummy().times(1).return_const(());
    hasher.expect_verify().never();

    let err = issuer(users, hasher, signer_for_any_user())
        .login(login("pw1"))
        .await
        .expect_err("unknown email rejected");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "invalid credentials");
}
