//! Unit tests for token secret loading.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn secret_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(&vec![b'k'; len]).expect("write secret");
    file
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn env_with_file(file: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([(
        SECRET_FILE_ENV,
        file.path().to_string_lossy().into_owned(),
    )])
}

fn missing_file_vars() -> HashMap<&'static str, String> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent");
    HashMap::from([(SECRET_FILE_ENV, path.to_string_lossy().into_owned())])
}

#[rstest]
fn release_reads_secret_file() {
    let file = secret_file(SECRET_MIN_LEN);
    let env = mock_env(env_with_file(&file));

    let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret loads");

    assert_eq!(secret.as_bytes(), vec![b'k'; SECRET_MIN_LEN].as_slice());
    assert_eq!(secret.source(), &SecretSource::File(file.path().to_path_buf()));
}

#[rstest]
#[case(BuildMode::Release, SECRET_MIN_LEN - 1)]
#[case(BuildMode::Release, 0)]
#[case(BuildMode::Debug, 0)]
fn short_secret_is_rejected(#[case] mode: BuildMode, #[case] len: usize) {
    let file = secret_file(len);
    let env = mock_env(env_with_file(&file));

    let err = token_secret_from_env(&env, mode).expect_err("short secret rejected");

    assert!(matches!(
        err,
        TokenConfigError::SecretTooShort { length, min_len: SECRET_MIN_LEN, .. } if length == len
    ));
}

#[rstest]
fn debug_tolerates_short_non_empty_secret() {
    let file = secret_file(8);
    let env = mock_env(env_with_file(&file));

    let secret = token_secret_from_env(&env, BuildMode::Debug).expect("secret loads");

    assert_eq!(secret.len(), 8);
}

#[rstest]
fn release_missing_file_is_a_read_error() {
    let env = mock_env(missing_file_vars());

    let err = token_secret_from_env(&env, BuildMode::Release).expect_err("missing file");

    assert!(matches!(err, TokenConfigError::SecretRead { .. }));
}

#[rstest]
fn debug_missing_file_falls_back_to_ephemeral() {
    let env = mock_env(missing_file_vars());

    let secret = token_secret_from_env(&env, BuildMode::Debug).expect("ephemeral secret");

    assert_eq!(secret.source(), &SecretSource::Ephemeral);
    assert_eq!(secret.len(), SECRET_MIN_LEN);
}

#[rstest]
fn debug_can_opt_out_of_ephemeral_fallback() {
    let mut vars = missing_file_vars();
    vars.insert(ALLOW_EPHEMERAL_ENV, "0".into());
    let env = mock_env(vars);

    let err = token_secret_from_env(&env, BuildMode::Debug).expect_err("fallback disabled");

    assert!(matches!(err, TokenConfigError::SecretRead { .. }));
}

#[rstest]
#[case("1")]
#[case("yes")]
fn release_refuses_ephemeral_opt_in(#[case] value: &str) {
    let file = secret_file(SECRET_MIN_LEN);
    let mut vars = env_with_file(&file);
    vars.insert(ALLOW_EPHEMERAL_ENV, value.into());
    let env = mock_env(vars);

    let err = token_secret_from_env(&env, BuildMode::Release).expect_err("opt-in refused");

    assert!(matches!(err, TokenConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_unparseable_toggle() {
    let file = secret_file(SECRET_MIN_LEN);
    let mut vars = env_with_file(&file);
    vars.insert(ALLOW_EPHEMERAL_ENV, "maybe".into());
    let env = mock_env(vars);

    let err = token_secret_from_env(&env, BuildMode::Release).expect_err("bad toggle");

    assert!(matches!(
        err,
        TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            ..
        }
    ));
}

#[rstest]
fn fingerprint_is_stable_and_distinguishes_secrets() {
    let a = TokenSecret::new(vec![b'a'; 32], SecretSource::Ephemeral);
    let again = TokenSecret::new(vec![b'a'; 32], SecretSource::Ephemeral);
    let b = TokenSecret::new(vec![b'b'; 32], SecretSource::Ephemeral);

    assert_eq!(a.fingerprint(), again.fingerprint());
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint(), a.fingerprint().to_lowercase());
}

#[rstest]
fn debug_output_hides_secret_bytes() {
    let secret = TokenSecret::new(
        b"super-secret-signing-material!!!".to_vec(),
        SecretSource::Ephemeral,
    );

    let rendered = format!("{secret:?}");

    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains(&secret.fingerprint()));
}
