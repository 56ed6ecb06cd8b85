//! MongoDB-backed friendship and friend request repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc};

use crate::domain::ports::{FriendRequestRepository, FriendshipRepository, RepositoryError};
use crate::domain::{
    FriendRequest, FriendRequestId, FriendRequestStatus, Friendship, FriendshipId, UserId,
};

use super::collection::DocCollection;
use super::documents::{FriendRequestDocument, FriendshipDocument};
use super::mongo_error_mapping::{is_duplicate_key, map_malformed, map_repository_error};
use super::store::{FRIEND_REQUESTS, FRIENDS, MongoStore};

#[derive(Clone)]
pub struct MongoFriendshipRepository {
    friends: DocCollection<FriendshipDocument>,
}

impl MongoFriendshipRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            friends: store.collection(FRIENDS),
        }
    }
}

#[async_trait]
impl FriendshipRepository for MongoFriendshipRepository {
    async fn insert(&self, friendship: &Friendship) -> Result<bool, RepositoryError> {
        match self
            .friends
            .create_one(&FriendshipDocument::from(friendship))
            .await
        {
            Ok(()) => Ok(true),
            Err(err) if is_duplicate_key(&err) => Ok(false),
            Err(err) => Err(map_repository_error(err)),
        }
    }

    async fn find_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Option<Friendship>, RepositoryError> {
        let (a, b) = (a.to_string(), b.to_string());
        let filter = doc! {
            "$or": [
                { "user1": a.as_str(), "user2": b.as_str() },
                { "user1": b.as_str(), "user2": a.as_str() },
            ]
        };
        self.friends
            .read_one(filter)
            .await
            .map_err(map_repository_error)?
            .map(|doc| Friendship::try_from(doc).map_err(map_malformed))
            .transpose()
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Friendship>, RepositoryError> {
        let user = user.to_string();
        self.friends
            .read_many(
                doc! { "$or": [{ "user1": user.as_str() }, { "user2": user.as_str() }] },
                doc! { "dateCreated": 1, "_id": 1 },
            )
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(|doc| Friendship::try_from(doc).map_err(map_malformed))
            .collect()
    }

    async fn delete(&self, id: &FriendshipId) -> Result<bool, RepositoryError> {
        self.friends
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)
    }
}

#[derive(Clone)]
pub struct MongoFriendRequestRepository {
    requests: DocCollection<FriendRequestDocument>,
}

impl MongoFriendRequestRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            requests: store.collection(FRIEND_REQUESTS),
        }
    }
}

fn status_value(status: FriendRequestStatus) -> Result<bson::Bson, RepositoryError> {
    bson::to_bson(&status)
        .map_err(|err| RepositoryError::query(format!("failed to encode status: {err}")))
}

#[async_trait]
impl FriendRequestRepository for MongoFriendRequestRepository {
    async fn insert_pending(&self, request: &FriendRequest) -> Result<bool, RepositoryError> {
        match self
            .requests
            .create_one(&FriendRequestDocument::from(request))
            .await
        {
            Ok(()) => Ok(true),
            Err(err) if is_duplicate_key(&err) => Ok(false),
            Err(err) => Err(map_repository_error(err)),
        }
    }

    async fn find_pending(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<Option<FriendRequest>, RepositoryError> {
        let filter = doc! {
            "from": from.to_string(),
            "to": to.to_string(),
            "status": status_value(FriendRequestStatus::Pending)?,
        };
        self.requests
            .read_one(filter)
            .await
            .map_err(map_repository_error)?
            .map(|doc| FriendRequest::try_from(doc).map_err(map_malformed))
            .transpose()
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<FriendRequest>, RepositoryError> {
        let user = user.to_string();
        self.requests
            .read_many(
                doc! { "$or": [{ "from": user.as_str() }, { "to": user.as_str() }] },
                doc! { "dateCreated": 1, "_id": 1 },
            )
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(|doc| FriendRequest::try_from(doc).map_err(map_malformed))
            .collect()
    }

    async fn resolve_pending(
        &self,
        id: &FriendRequestId,
        status: FriendRequestStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        self.requests
            .partial_update_one(
                doc! {
                    "_id": id.to_string(),
                    "status": status_value(FriendRequestStatus::Pending)?,
                },
                doc! {
                    "status": status_value(status)?,
                    "dateUpdated": bson::DateTime::from_chrono(at),
                },
            )
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: &FriendRequestId) -> Result<bool, RepositoryError> {
        self.requests
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)
    }
}
