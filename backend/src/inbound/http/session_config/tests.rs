//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("focusfeed-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'a'; len]).expect("write temporary key file");
        Self { path }
    }

    fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn key_file() -> TempKeyFile {
    TempKeyFile::new(SESSION_KEY_MIN_LEN)
}

fn release_vars(key_file: &TempKeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_file.path_str()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(err) => err,
    }
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggles(key_file: TempKeyFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&key_file);
    vars.remove(missing);

    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(COOKIE_SECURE_ENV, "")]
#[case(SAMESITE_ENV, "sideways")]
#[case(ALLOW_EPHEMERAL_ENV, "sometimes")]
fn release_rejects_malformed_toggles(
    key_file: TempKeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&key_file);
    vars.insert(name, value.to_owned());

    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: got, .. } if got == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_requires_a_readable_key(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(KEY_FILE_ENV, format!("{}-missing", key_file.path_str()));

    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = TempKeyFile::new(SESSION_KEY_MIN_LEN - 1);
    let err = release_error(release_vars(&short));
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length, min_len, .. }
            if length == SESSION_KEY_MIN_LEN - 1 && min_len == SESSION_KEY_MIN_LEN
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_accepts_complete_settings(key_file: TempKeyFile) {
    let env = mock_env(release_vars(&key_file));
    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("valid release settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn file_key_is_stable_across_loads(key_file: TempKeyFile) {
    let first = session_settings_from_env(&mock_env(release_vars(&key_file)), BuildMode::Release)
        .expect("first load");
    let second = session_settings_from_env(&mock_env(release_vars(&key_file)), BuildMode::Release)
        .expect("second load");

    assert_eq!(
        fingerprint::key_fingerprint(&first.key),
        fingerprint::key_fingerprint(&second.key)
    );
}

#[rstest]
fn debug_defaults_are_secure_and_lax() {
    let env = mock_env(HashMap::from([(
        KEY_FILE_ENV,
        "/nonexistent/focusfeed-key".to_owned(),
    )]));
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("lax", SameSite::Lax)]
#[case("STRICT", SameSite::Strict)]
#[case("bogus", SameSite::Lax)]
fn debug_same_site_parsing(key_file: TempKeyFile, #[case] raw: &str, #[case] expected: SameSite) {
    let mut vars = release_vars(&key_file);
    vars.insert(SAMESITE_ENV, raw.to_owned());

    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug settings");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
fn debug_allows_insecure_same_site_none(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "n".to_owned());
    vars.insert(SAMESITE_ENV, "none".to_owned());

    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug settings");
    assert!(!settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::None);
}
