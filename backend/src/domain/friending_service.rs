//! Friending concept: friend requests and the friendships they create.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{FriendRequestRepository, FriendshipRepository, RepositoryError};
use crate::domain::{
    Error, FriendRequest, FriendRequestId, FriendRequestStatus, Friendship, FriendshipId, UserId,
};

/// Service owning the `friends` and `friend_requests` collections.
#[derive(Clone)]
pub struct FriendingService {
    friendships: Arc<dyn FriendshipRepository>,
    requests: Arc<dyn FriendRequestRepository>,
    clock: Arc<dyn Clock>,
}

impl FriendingService {
    pub fn new(
        friendships: Arc<dyn FriendshipRepository>,
        requests: Arc<dyn FriendRequestRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            friendships,
            requests,
            clock,
        }
    }

    fn map_error(error: RepositoryError) -> Error {
        error.into_domain("friend")
    }

    async fn pending(&self, from: &UserId, to: &UserId) -> Result<Option<FriendRequest>, Error> {
        self.requests
            .find_pending(from, to)
            .await
            .map_err(Self::map_error)
    }

    async fn require_pending(&self, from: &UserId, to: &UserId) -> Result<FriendRequest, Error> {
        self.pending(from, to).await?.ok_or_else(|| {
            Error::not_found(format!("Friend request from {from} to {to} does not exist!"))
        })
    }

    async fn assert_not_friends(&self, a: &UserId, b: &UserId) -> Result<(), Error> {
        let existing = self
            .friendships
            .find_between(a, b)
            .await
            .map_err(Self::map_error)?;
        if existing.is_some() {
            return Err(Error::conflict(format!("{a} and {b} are already friends!")));
        }
        Ok(())
    }

    async fn resolve(
        &self,
        request: &FriendRequest,
        status: FriendRequestStatus,
    ) -> Result<(), Error> {
        let updated = self
            .requests
            .resolve_pending(&request.id, status, self.clock.utc())
            .await
            .map_err(Self::map_error)?;
        if !updated {
            return Err(Error::not_found(format!(
                "Friend request from {} to {} does not exist!",
                request.from, request.to
            )));
        }
        Ok(())
    }

    /// Requests sent or received by `user`.
    pub async fn get_requests(&self, user: &UserId) -> Result<Vec<FriendRequest>, Error> {
        self.requests
            .list_for_user(user)
            .await
            .map_err(Self::map_error)
    }

    /// Send a request unless the users are already linked in either direction.
    pub async fn send_request(&self, from: UserId, to: UserId) -> Result<FriendRequest, Error> {
        if from == to {
            return Err(Error::invalid_request("Cannot send a friend request to yourself!")
                .with_details(json!({ "field": "to", "code": "self_request" })));
        }
        self.assert_not_friends(&from, &to).await?;
        let duplicate = || {
            Error::conflict(format!(
                "Friend request between {from} and {to} already exists!"
            ))
        };
        if self.pending(&from, &to).await?.is_some() || self.pending(&to, &from).await?.is_some()
        {
            return Err(duplicate());
        }
        let now = self.clock.utc();
        let request = FriendRequest {
            id: FriendRequestId::generate(),
            from,
            to,
            status: FriendRequestStatus::Pending,
            date_created: now,
            date_updated: now,
        };
        let stored = self
            .requests
            .insert_pending(&request)
            .await
            .map_err(Self::map_error)?;
        if !stored {
            return Err(duplicate());
        }
        info!(request_id = %request.id, from = %from, to = %to, "friend request sent");
        Ok(request)
    }

    /// Withdraw a pending request sent by `from`.
    pub async fn remove_request(&self, from: &UserId, to: &UserId) -> Result<(), Error> {
        let request = self.require_pending(from, to).await?;
        if !self
            .requests
            .delete(&request.id)
            .await
            .map_err(Self::map_error)?
        {
            return Err(Error::not_found(format!(
                "Friend request from {from} to {to} does not exist!"
            )));
        }
        info!(request_id = %request.id, "friend request removed");
        Ok(())
    }

    /// Accept the pending request from `from` to `to` and link the users.
    pub async fn accept_request(&self, from: &UserId, to: &UserId) -> Result<Friendship, Error> {
        let request = self.require_pending(from, to).await?;
        self.resolve(&request, FriendRequestStatus::Accepted).await?;
        let now = self.clock.utc();
        let friendship = Friendship {
            id: FriendshipId::generate(),
            user1: *from,
            user2: *to,
            date_created: now,
            date_updated: now,
        };
        let linked = self
            .friendships
            .insert(&friendship)
            .await
            .map_err(Self::map_error)?;
        if !linked {
            return Err(Error::conflict(format!("{from} and {to} are already friends!")));
        }
        info!(request_id = %request.id, friendship_id = %friendship.id, "friend request accepted");
        Ok(friendship)
    }

    pub async fn reject_request(&self, from: &UserId, to: &UserId) -> Result<(), Error> {
        let request = self.require_pending(from, to).await?;
        self.resolve(&request, FriendRequestStatus::Rejected).await?;
        info!(request_id = %request.id, "friend request rejected");
        Ok(())
    }

    /// Remove the friendship between `user` and `friend`.
    pub async fn remove_friend(&self, user: &UserId, friend: &UserId) -> Result<(), Error> {
        let missing = || {
            Error::not_found(format!(
                "Friendship between {user} and {friend} does not exist!"
            ))
        };
        let friendship = self
            .friendships
            .find_between(user, friend)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(missing)?;
        if !self
            .friendships
            .delete(&friendship.id)
            .await
            .map_err(Self::map_error)?
        {
            return Err(missing());
        }
        info!(friendship_id = %friendship.id, "friendship removed");
        Ok(())
    }

    /// Ids of everyone `user` is friends with.
    pub async fn get_friends(&self, user: &UserId) -> Result<Vec<UserId>, Error> {
        let friendships = self
            .friendships
            .list_for_user(user)
            .await
            .map_err(Self::map_error)?;
        Ok(friendships
            .iter()
            .filter_map(|friendship| friendship.other(user))
            .collect())
    }
}

#[cfg(test)]
#[path = "friending_service_tests.rs"]
mod tests;
