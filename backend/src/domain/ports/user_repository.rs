//! Port abstraction for user account persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{PasswordDigest, UserAccount, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "user repository query failed: {message}",
        /// Another account already holds the username.
        DuplicateUsername { username } => "username {username} is already taken",
    }
}

/// Storage for registered accounts.
///
/// Usernames are unique. Adapters report a clash as
/// [`UserRepositoryError::DuplicateUsername`] so the uniqueness rule holds
/// even when two registrations race past the service's lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Fetch an account by its exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Every account, ordered by username.
    async fn list_all(&self) -> Result<Vec<UserAccount>, UserRepositoryError>;

    /// Accounts matching `ids`, in no particular order. Unknown ids are skipped.
    async fn find_many_by_ids(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserAccount>, UserRepositoryError>;

    /// Rename an account. Returns `false` when the account does not exist.
    async fn update_username(
        &self,
        id: &UserId,
        username: &Username,
        at: DateTime<Utc>,
    ) -> Result<bool, UserRepositoryError>;

    /// Replace the stored password digest. Returns `false` when the account
    /// does not exist.
    async fn update_password(
        &self,
        id: &UserId,
        password: &PasswordDigest,
        at: DateTime<Utc>,
    ) -> Result<bool, UserRepositoryError>;

    /// Remove an account. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError>;
}
