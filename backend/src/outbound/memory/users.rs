//! In-memory `UserRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{PasswordDigest, UserAccount, UserId, Username};

/// Accounts keyed by id. Username uniqueness is checked under the write lock.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    accounts: RwLock<HashMap<UserId, UserAccount>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(
    accounts: &HashMap<UserId, UserAccount>,
    username: &Username,
    except: Option<&UserId>,
) -> bool {
    accounts
        .values()
        .any(|account| account.user.username == *username && Some(&account.user.id) != except)
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        let mut accounts = self.accounts.write().await;
        if name_taken(&accounts, &account.user.username, None) {
            return Err(UserRepositoryError::duplicate_username(
                account.user.username.to_string(),
            ));
        }
        accounts.insert(account.user.id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserRepositoryError> {
        Ok(self.accounts.read().await.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.user.username == *username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserAccount>, UserRepositoryError> {
        let mut accounts: Vec<UserAccount> =
            self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| a.user.username.cmp(&b.user.username));
        Ok(accounts)
    }

    async fn find_many_by_ids(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserAccount>, UserRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(ids.iter().filter_map(|id| accounts.get(id).cloned()).collect())
    }

    async fn update_username(
        &self,
        id: &UserId,
        username: &Username,
        at: DateTime<Utc>,
    ) -> Result<bool, UserRepositoryError> {
        let mut accounts = self.accounts.write().await;
        if name_taken(&accounts, username, Some(id)) {
            return Err(UserRepositoryError::duplicate_username(username.to_string()));
        }
        Ok(match accounts.get_mut(id) {
            Some(account) => {
                account.user.username = username.clone();
                account.date_updated = at;
                true
            }
            None => false,
        })
    }

    async fn update_password(
        &self,
        id: &UserId,
        password: &PasswordDigest,
        at: DateTime<Utc>,
    ) -> Result<bool, UserRepositoryError> {
        let mut accounts = self.accounts.write().await;
        Ok(match accounts.get_mut(id) {
            Some(account) => {
                account.password = password.clone();
                account.date_updated = at;
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        Ok(self.accounts.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::account;

    #[tokio::test]
    async fn insert_rejects_duplicate_usernames() {
        let repo = MemoryUserRepository::new();
        repo.insert(&account("ada")).await.expect("first insert");

        let err = repo.insert(&account("ada")).await.expect_err("duplicate");
        assert_eq!(err, UserRepositoryError::duplicate_username("ada"));
    }

    #[tokio::test]
    async fn list_all_orders_by_username() {
        let repo = MemoryUserRepository::new();
        for name in ["carol", "ada", "bob"] {
            repo.insert(&account(name)).await.expect("insert");
        }

        let names: Vec<String> = repo
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .map(|account| account.user.username.into())
            .collect();
        assert_eq!(names, vec!["ada", "bob", "carol"]);
    }

    #[tokio::test]
    async fn update_username_keeps_uniqueness() {
        let repo = MemoryUserRepository::new();
        let ada = account("ada");
        repo.insert(&ada).await.expect("insert");
        repo.insert(&account("bob")).await.expect("insert");
        let bob_name = Username::new("bob").expect("username");

        let err = repo
            .update_username(&ada.user.id, &bob_name, ada.date_created)
            .await
            .expect_err("taken");
        assert!(matches!(err, UserRepositoryError::DuplicateUsername { .. }));
    }
}
