//! Regression coverage for user primitives.

use super::*;
use rstest::rstest;

#[rstest]
#[case("ada", "ada")]
#[case("  grace hopper ", "grace hopper")]
#[case("émile", "émile")]
fn usernames_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("tab\there", UserValidationError::UsernameInvalidCharacters)]
fn invalid_usernames_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw).expect_err("invalid"), expected);
}

#[test]
fn overlong_username_is_rejected() {
    let raw = "x".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw).expect_err("too long"),
        UserValidationError::UsernameTooLong { max: USERNAME_MAX }
    );
}

#[test]
fn user_view_serialises_without_credentials() {
    let user = User {
        id: UserId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id"),
        username: Username::new("ada").expect("username"),
    };
    let value = serde_json::to_value(&user).expect("serialise");
    assert_eq!(
        value,
        serde_json::json!({ "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "username": "ada" })
    );
}

#[test]
fn digest_debug_is_redacted() {
    let digest = PasswordDigest::from_phc("$argon2id$v=19$secret".to_owned());
    assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
}
