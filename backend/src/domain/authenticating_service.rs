//! Authenticating concept: registration, login and account maintenance.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CredentialHasher, CredentialHasherError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Credentials, CredentialsValidationError, Error, Password, User, UserAccount, UserId,
    UserValidationError, Username,
};

/// Placeholder shown in place of users that no longer exist.
pub const DELETED_USER: &str = "DELETED_USER";

/// Login failure message. Unknown users and bad passwords look the same.
pub const INCORRECT_CREDENTIALS: &str = "Username or password is incorrect.";

/// Account service backing registration, login and profile changes.
#[derive(Clone)]
pub struct AuthenticatingService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    clock: Arc<dyn Clock>,
}

impl AuthenticatingService {
    /// Create a service over the given account store and hasher.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::DuplicateUsername { username } => Self::username_taken(&username),
        }
    }

    fn map_hasher_error(error: CredentialHasherError) -> Error {
        Error::internal(error.to_string())
    }

    fn username_taken(username: &str) -> Error {
        Error::conflict(format!("User with username {username} already exists!"))
            .with_details(json!({ "field": "username", "code": "username_taken" }))
    }

    fn invalid_username(error: &UserValidationError) -> Error {
        Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "username", "code": "invalid_username" }))
    }

    async fn assert_username_available(
        &self,
        username: &Username,
        allow: Option<&UserId>,
    ) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_username(username)
            .await
            .map_err(Self::map_user_error)?;
        match existing {
            Some(account) if Some(&account.user.id) != allow => {
                Err(Self::username_taken(username.as_ref()))
            }
            _ => Ok(()),
        }
    }

    async fn find_account(&self, id: &UserId) -> Result<UserAccount, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found("User not found!"))
    }

    /// Register a new account and return its public view.
    pub async fn create(&self, credentials: &Credentials) -> Result<User, Error> {
        self.assert_username_available(credentials.username(), None)
            .await?;
        let password = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(Self::map_hasher_error)?;
        let now = self.clock.utc();
        let account = UserAccount {
            user: User {
                id: UserId::generate(),
                username: credentials.username().clone(),
            },
            password,
            date_created: now,
            date_updated: now,
        };
        self.users
            .insert(&account)
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %account.user.id, username = %account.user.username, "user created");
        Ok(account.user)
    }

    /// Check credentials. Unknown usernames and wrong passwords fail alike.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_user_error)?
        else {
            debug!(username = %credentials.username(), "login for unknown username");
            return Err(Error::unauthorized(INCORRECT_CREDENTIALS));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), &account.password)
            .await
            .map_err(Self::map_hasher_error)?;
        if !matches {
            debug!(user_id = %account.user.id, "login with wrong password");
            return Err(Error::unauthorized(INCORRECT_CREDENTIALS));
        }
        Ok(account.user)
    }

    pub async fn get_user_by_id(&self, id: &UserId) -> Result<User, Error> {
        self.find_account(id).await.map(|account| account.user)
    }

    /// Look up a user by name. Malformed names are simply not found.
    pub async fn get_user_by_username(&self, raw: &str) -> Result<User, Error> {
        let not_found = || Error::not_found(format!("User with username {raw} does not exist!"));
        let username = Username::new(raw).map_err(|_| not_found())?;
        self.users
            .find_by_username(&username)
            .await
            .map_err(Self::map_user_error)?
            .map(|account| account.user)
            .ok_or_else(not_found)
    }

    /// All users, ordered by username.
    pub async fn get_users(&self) -> Result<Vec<User>, Error> {
        let accounts = self.users.list_all().await.map_err(Self::map_user_error)?;
        Ok(accounts.into_iter().map(|account| account.user).collect())
    }

    /// Resolve ids to usernames, preserving order. Missing users map to
    /// [`DELETED_USER`].
    pub async fn ids_to_usernames(&self, ids: &[UserId]) -> Result<Vec<String>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let accounts = self
            .users
            .find_many_by_ids(ids)
            .await
            .map_err(Self::map_user_error)?;
        let names: HashMap<UserId, String> = accounts
            .into_iter()
            .map(|account| (account.user.id, account.user.username.into()))
            .collect();
        Ok(ids
            .iter()
            .map(|id| names.get(id).cloned().unwrap_or_else(|| DELETED_USER.to_owned()))
            .collect())
    }

    /// Rename an account. Keeping the current name is a no-op success.
    pub async fn update_username(&self, id: &UserId, raw: &str) -> Result<(), Error> {
        let username = Username::new(raw).map_err(|err| Self::invalid_username(&err))?;
        self.assert_username_available(&username, Some(id)).await?;
        let updated = self
            .users
            .update_username(id, &username, self.clock.utc())
            .await
            .map_err(Self::map_user_error)?;
        if !updated {
            return Err(Error::not_found("User not found!"));
        }
        info!(user_id = %id, username = %username, "username updated");
        Ok(())
    }

    /// Replace the password after checking the current one.
    pub async fn update_password(
        &self,
        id: &UserId,
        current: &str,
        new: &str,
    ) -> Result<(), Error> {
        let account = self.find_account(id).await?;
        let wrong_current = || Error::forbidden("The given current password is wrong!");
        let current = Password::new(current).map_err(|_| wrong_current())?;
        let matches = self
            .hasher
            .verify(&current, &account.password)
            .await
            .map_err(Self::map_hasher_error)?;
        if !matches {
            return Err(wrong_current());
        }
        let new = Password::new(new).map_err(|err: CredentialsValidationError| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "newPassword", "code": "empty_field" }))
        })?;
        let digest = self
            .hasher
            .hash(&new)
            .await
            .map_err(Self::map_hasher_error)?;
        let updated = self
            .users
            .update_password(id, &digest, self.clock.utc())
            .await
            .map_err(Self::map_user_error)?;
        if !updated {
            return Err(Error::not_found("User not found!"));
        }
        info!(user_id = %id, "password updated");
        Ok(())
    }

    /// Remove the account. Content the user authored is left in place.
    pub async fn delete(&self, id: &UserId) -> Result<(), Error> {
        let deleted = self.users.delete(id).await.map_err(Self::map_user_error)?;
        if !deleted {
            return Err(Error::not_found("User not found!"));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "authenticating_service_tests.rs"]
mod tests;
