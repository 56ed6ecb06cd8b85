//! In-memory friendships and friend requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{FriendRequestRepository, FriendshipRepository, RepositoryError};
use crate::domain::{
    FriendRequest, FriendRequestId, FriendRequestStatus, Friendship, FriendshipId, UserId,
};

#[derive(Debug, Default)]
pub struct MemoryFriendshipRepository {
    friendships: RwLock<Vec<Friendship>>,
}

impl MemoryFriendshipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FriendshipRepository for MemoryFriendshipRepository {
    async fn insert(&self, friendship: &Friendship) -> Result<bool, RepositoryError> {
        let mut friendships = self.friendships.write().await;
        if friendships
            .iter()
            .any(|existing| existing.links(&friendship.user1, &friendship.user2))
        {
            return Ok(false);
        }
        friendships.push(friendship.clone());
        Ok(true)
    }

    async fn find_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Option<Friendship>, RepositoryError> {
        Ok(self
            .friendships
            .read()
            .await
            .iter()
            .find(|friendship| friendship.links(a, b))
            .cloned())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Friendship>, RepositoryError> {
        Ok(self
            .friendships
            .read()
            .await
            .iter()
            .filter(|friendship| friendship.other(user).is_some())
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &FriendshipId) -> Result<bool, RepositoryError> {
        let mut friendships = self.friendships.write().await;
        let before = friendships.len();
        friendships.retain(|friendship| friendship.id != *id);
        Ok(friendships.len() != before)
    }
}

#[derive(Debug, Default)]
pub struct MemoryFriendRequestRepository {
    requests: RwLock<Vec<FriendRequest>>,
}

impl MemoryFriendRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FriendRequestRepository for MemoryFriendRequestRepository {
    async fn insert_pending(&self, request: &FriendRequest) -> Result<bool, RepositoryError> {
        let mut requests = self.requests.write().await;
        if requests.iter().any(|existing| {
            existing.status == FriendRequestStatus::Pending
                && existing.involves(&request.from)
                && existing.involves(&request.to)
        }) {
            return Ok(false);
        }
        requests.push(request.clone());
        Ok(true)
    }

    async fn find_pending(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<Option<FriendRequest>, RepositoryError> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|request| {
                request.from == *from
                    && request.to == *to
                    && request.status == FriendRequestStatus::Pending
            })
            .cloned())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<FriendRequest>, RepositoryError> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .filter(|request| request.involves(user))
            .cloned()
            .collect())
    }

    async fn resolve_pending(
        &self,
        id: &FriendRequestId,
        status: FriendRequestStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut requests = self.requests.write().await;
        let pending = requests
            .iter_mut()
            .find(|request| request.id == *id && request.status == FriendRequestStatus::Pending);
        Ok(match pending {
            Some(request) => {
                request.status = status;
                request.date_updated = at;
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: &FriendRequestId) -> Result<bool, RepositoryError> {
        let mut requests = self.requests.write().await;
        let before = requests.len();
        requests.retain(|request| request.id != *id);
        Ok(requests.len() != before)
    }
}
