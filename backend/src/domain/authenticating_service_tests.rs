//! Tests for the Authenticating concept service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::PasswordDigest;
use crate::domain::ports::{MockCredentialHasher, MockUserRepository};
use crate::domain::test_fixtures::{account, fixture_clock, fixture_timestamp};

fn make_service(users: MockUserRepository, hasher: MockCredentialHasher) -> AuthenticatingService {
    AuthenticatingService::new(Arc::new(users), Arc::new(hasher), fixture_clock())
}

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials::try_from_parts(username, password).expect("valid credentials")
}

#[tokio::test]
async fn create_hashes_password_and_stores_account() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .times(1)
        .return_once(|_| Ok(None));
    users
        .expect_insert()
        .withf(|account| {
            account.user.username.as_ref() == "ada"
                && account.password.as_phc() == "$argon2id$digest"
                && account.date_created == fixture_timestamp()
        })
        .times(1)
        .return_once(|_| Ok(()));
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_hash()
        .withf(|password| password.expose() == "hunter2")
        .times(1)
        .return_once(|_| Ok(PasswordDigest::from_phc("$argon2id$digest".to_owned())));

    let user = make_service(users, hasher)
        .create(&credentials(" ada ", "hunter2"))
        .await
        .expect("user created");
    assert_eq!(user.username.as_ref(), "ada");
}

#[tokio::test]
async fn create_rejects_taken_username() {
    let existing = account("ada");
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(move |_| Ok(Some(existing)));
    users.expect_insert().never();

    let err = make_service(users, MockCredentialHasher::new())
        .create(&credentials("ada", "pw"))
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "User with username ada already exists!");
}

#[tokio::test]
async fn create_maps_racing_duplicate_insert_to_conflict() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().return_once(|_| Ok(None));
    users
        .expect_insert()
        .return_once(|_| Err(UserRepositoryError::duplicate_username("ada")));
    let mut hasher = MockCredentialHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordDigest::from_phc("$d".to_owned())));

    let err = make_service(users, hasher)
        .create(&credentials("ada", "pw"))
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(None, false)]
#[case(Some(false), true)]
#[tokio::test]
async fn authenticate_rejects_unknown_user_and_wrong_password(
    #[case] verified: Option<bool>,
    #[case] user_exists: bool,
) {
    let mut users = MockUserRepository::new();
    let stored = user_exists.then(|| account("ada"));
    users
        .expect_find_by_username()
        .return_once(move |_| Ok(stored));
    let mut hasher = MockCredentialHasher::new();
    if let Some(result) = verified {
        hasher.expect_verify().return_once(move |_, _| Ok(result));
    }

    let err = make_service(users, hasher)
        .authenticate(&credentials("ada", "pw"))
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "Username or password is incorrect.");
}

#[tokio::test]
async fn authenticate_returns_user_on_match() {
    let stored = account("ada");
    let expected = stored.user.clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(move |_| Ok(Some(stored)));
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_verify().return_once(|_, _| Ok(true));

    let user = make_service(users, hasher)
        .authenticate(&credentials("ada", "pw"))
        .await
        .expect("authenticated");
    assert_eq!(user, expected);
}

#[rstest]
#[case("")]
#[case("ghost")]
#[tokio::test]
async fn get_user_by_username_reports_missing_users(#[case] username: &str) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));

    let err = make_service(users, MockCredentialHasher::new())
        .get_user_by_username(username)
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        err.message(),
        format!("User with username {username} does not exist!")
    );
}

#[tokio::test]
async fn ids_to_usernames_preserves_order_and_marks_deleted() {
    let ada = account("ada");
    let bob = account("bob");
    let ghost = UserId::generate();
    let ids = vec![bob.user.id, ghost, ada.user.id];
    let mut users = MockUserRepository::new();
    users
        .expect_find_many_by_ids()
        .times(1)
        .return_once(move |_| Ok(vec![ada, bob]));

    let names = make_service(users, MockCredentialHasher::new())
        .ids_to_usernames(&ids)
        .await
        .expect("resolved");
    assert_eq!(names, vec!["bob", DELETED_USER, "ada"]);
}

#[tokio::test]
async fn ids_to_usernames_skips_lookup_for_empty_input() {
    let mut users = MockUserRepository::new();
    users.expect_find_many_by_ids().never();

    let names = make_service(users, MockCredentialHasher::new())
        .ids_to_usernames(&[])
        .await
        .expect("resolved");
    assert!(names.is_empty());
}

#[tokio::test]
async fn update_username_allows_keeping_own_name() {
    let stored = account("ada");
    let id = stored.user.id;
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(move |_| Ok(Some(stored)));
    users
        .expect_update_username()
        .times(1)
        .return_once(|_, _, _| Ok(true));

    make_service(users, MockCredentialHasher::new())
        .update_username(&id, "ada")
        .await
        .expect("no-op rename");
}

#[tokio::test]
async fn update_username_rejects_name_held_by_someone_else() {
    let other = account("bob");
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(move |_| Ok(Some(other)));
    users.expect_update_username().never();

    let err = make_service(users, MockCredentialHasher::new())
        .update_username(&UserId::generate(), "bob")
        .await
        .expect_err("taken");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn update_username_validates_input() {
    let err = make_service(MockUserRepository::new(), MockCredentialHasher::new())
        .update_username(&UserId::generate(), "   ")
        .await
        .expect_err("blank");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case("", false)]
#[case("wrong", true)]
#[tokio::test]
async fn update_password_rejects_wrong_current_password(
    #[case] current: &str,
    #[case] reaches_hasher: bool,
) {
    let stored = account("ada");
    let id = stored.user.id;
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    users.expect_update_password().never();
    let mut hasher = MockCredentialHasher::new();
    if reaches_hasher {
        hasher.expect_verify().return_once(|_, _| Ok(false));
    }

    let err = make_service(users, hasher)
        .update_password(&id, current, "new-secret")
        .await
        .expect_err("wrong password");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), "The given current password is wrong!");
}

#[tokio::test]
async fn update_password_stores_new_digest() {
    let stored = account("ada");
    let id = stored.user.id;
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    users
        .expect_update_password()
        .withf(|_, digest, _| digest.as_phc() == "$new")
        .times(1)
        .return_once(|_, _, _| Ok(true));
    let mut hasher = MockCredentialHasher::new();
    hasher.expect_verify().return_once(|_, _| Ok(true));
    hasher
        .expect_hash()
        .withf(|password| password.expose() == "new-secret")
        .return_once(|_| Ok(PasswordDigest::from_phc("$new".to_owned())));

    make_service(users, hasher)
        .update_password(&id, "old", "new-secret")
        .await
        .expect("password updated");
}

#[rstest]
#[case(UserRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserRepositoryError::query("boom"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_map_to_domain_errors(
    #[case] failure: UserRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users.expect_list_all().return_once(move || Err(failure));

    let err = make_service(users, MockCredentialHasher::new())
        .get_users()
        .await
        .expect_err("failure");
    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn delete_reports_missing_account() {
    let mut users = MockUserRepository::new();
    users.expect_delete().return_once(|_| Ok(false));

    let err = make_service(users, MockCredentialHasher::new())
        .delete(&UserId::generate())
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found!");
}
