//! Ports for friendships and friend requests.
//!
//! The two collections are independent: accepting a request updates one
//! document and inserts another without a transaction. Adapters make each
//! step a guarded write instead, so concurrent callers cannot both win.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    FriendRequest, FriendRequestId, FriendRequestStatus, Friendship, FriendshipId, UserId,
};

use super::RepositoryError;

/// Storage for established friendships.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendshipRepository: Send + Sync {
    /// Store `friendship`. Returns `false` when the pair is already linked.
    async fn insert(&self, friendship: &Friendship) -> Result<bool, RepositoryError>;

    /// The friendship linking `a` and `b` in either order.
    async fn find_between(
        &self,
        a: &UserId,
        b: &UserId,
    ) -> Result<Option<Friendship>, RepositoryError>;

    /// Every friendship `user` takes part in.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Friendship>, RepositoryError>;

    async fn delete(&self, id: &FriendshipId) -> Result<bool, RepositoryError>;
}

/// Storage for friend requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendRequestRepository: Send + Sync {
    /// Store a pending request. Returns `false` when a pending request
    /// already exists between the pair, in either direction.
    async fn insert_pending(&self, request: &FriendRequest) -> Result<bool, RepositoryError>;

    /// The pending request sent by `from` to `to`. Direction matters.
    async fn find_pending(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<Option<FriendRequest>, RepositoryError>;

    /// Requests sent or received by `user`, oldest first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<FriendRequest>, RepositoryError>;

    /// Move a pending request to `status`. Returns `false` when the request
    /// is missing or was already resolved.
    async fn resolve_pending(
        &self,
        id: &FriendRequestId,
        status: FriendRequestStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: &FriendRequestId) -> Result<bool, RepositoryError>;
}
