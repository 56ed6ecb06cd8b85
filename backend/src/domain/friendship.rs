//! Friendships and the requests that create them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{FriendRequestId, FriendshipId, UserId};

/// Lifecycle of a friend request. Only `Pending` requests can be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A friend request from one user to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRequest {
    pub id: FriendRequestId,
    pub from: UserId,
    pub to: UserId,
    pub status: FriendRequestStatus,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl FriendRequest {
    /// Whether `user` sent or received this request.
    #[must_use]
    pub fn involves(&self, user: &UserId) -> bool {
        self.from == *user || self.to == *user
    }
}

/// An undirected friendship. `user1`/`user2` order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friendship {
    pub id: FriendshipId,
    pub user1: UserId,
    pub user2: UserId,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl Friendship {
    /// Whether this friendship links `a` and `b`, in either order.
    #[must_use]
    pub fn links(&self, a: &UserId, b: &UserId) -> bool {
        (self.user1 == *a && self.user2 == *b) || (self.user1 == *b && self.user2 == *a)
    }

    /// The other side of the friendship, if `user` is part of it.
    #[must_use]
    pub fn other(&self, user: &UserId) -> Option<UserId> {
        if self.user1 == *user {
            Some(self.user2)
        } else if self.user2 == *user {
            Some(self.user1)
        } else {
            None
        }
    }
}
