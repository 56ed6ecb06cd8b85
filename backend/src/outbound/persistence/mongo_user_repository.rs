//! MongoDB-backed `UserRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc};

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{PasswordDigest, UserAccount, UserId, Username};

use super::collection::DocCollection;
use super::documents::UserDocument;
use super::mongo_error_mapping::{is_duplicate_key, map_user_error, map_user_malformed};
use super::store::{MongoStore, USERS};

/// Account storage in the `users` collection. A unique index on `username`
/// turns racing registrations into [`UserRepositoryError::DuplicateUsername`].
#[derive(Clone)]
pub struct MongoUserRepository {
    users: DocCollection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            users: store.collection(USERS),
        }
    }

    fn to_accounts(docs: Vec<UserDocument>) -> Result<Vec<UserAccount>, UserRepositoryError> {
        docs.into_iter()
            .map(|doc| UserAccount::try_from(doc).map_err(map_user_malformed))
            .collect()
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserRepositoryError> {
        self.users
            .create_one(&UserDocument::from(account))
            .await
            .map_err(|err| {
                if is_duplicate_key(&err) {
                    UserRepositoryError::duplicate_username(account.user.username.to_string())
                } else {
                    map_user_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserRepositoryError> {
        self.users
            .read_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_user_error)?
            .map(|doc| UserAccount::try_from(doc).map_err(map_user_malformed))
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        self.users
            .read_one(doc! { "username": username.as_ref() })
            .await
            .map_err(map_user_error)?
            .map(|doc| UserAccount::try_from(doc).map_err(map_user_malformed))
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<UserAccount>, UserRepositoryError> {
        let docs = self
            .users
            .read_many(doc! {}, doc! { "username": 1 })
            .await
            .map_err(map_user_error)?;
        Self::to_accounts(docs)
    }

    async fn find_many_by_ids(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<UserAccount>, UserRepositoryError> {
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let docs = self
            .users
            .read_many(doc! { "_id": { "$in": keys } }, doc! { "_id": 1 })
            .await
            .map_err(map_user_error)?;
        Self::to_accounts(docs)
    }

    async fn update_username(
        &self,
        id: &UserId,
        username: &Username,
        at: DateTime<Utc>,
    ) -> Result<bool, UserRepositoryError> {
        self.users
            .partial_update_one(
                doc! { "_id": id.to_string() },
                doc! {
                    "username": username.as_ref(),
                    "dateUpdated": bson::DateTime::from_chrono(at),
                },
            )
            .await
            .map_err(|err| {
                if is_duplicate_key(&err) {
                    UserRepositoryError::duplicate_username(username.to_string())
                } else {
                    map_user_error(err)
                }
            })
    }

    async fn update_password(
        &self,
        id: &UserId,
        password: &PasswordDigest,
        at: DateTime<Utc>,
    ) -> Result<bool, UserRepositoryError> {
        self.users
            .partial_update_one(
                doc! { "_id": id.to_string() },
                doc! {
                    "passwordHash": password.as_phc(),
                    "dateUpdated": bson::DateTime::from_chrono(at),
                },
            )
            .await
            .map_err(map_user_error)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        self.users
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_user_error)
    }
}
