//! Adapter selection: binds every domain port to a concrete outbound
//! adapter for [`HttpState`](crate::inbound::http::state::HttpState).
//!
//! Lives outside the hexagon so inbound code never names an outbound type.

use std::sync::Arc;

use crate::inbound::http::state::HttpStatePorts;
use crate::outbound::crypto::Argon2CredentialHasher;
use crate::outbound::memory::{
    MemoryCommentRepository, MemoryEventRepository, MemoryFriendRequestRepository,
    MemoryFriendshipRepository, MemoryGoalRepository, MemoryPostRepository, MemoryUserRepository,
};
use crate::outbound::persistence::{
    MongoCommentRepository, MongoEventRepository, MongoFriendRequestRepository,
    MongoFriendshipRepository, MongoGoalRepository, MongoPostRepository, MongoStore,
    MongoUserRepository,
};

/// Process-local adapters with an Argon2 hasher. Data is lost on restart.
#[must_use]
pub fn memory_ports() -> HttpStatePorts {
    HttpStatePorts {
        users: Arc::new(MemoryUserRepository::new()),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        posts: Arc::new(MemoryPostRepository::new()),
        comments: Arc::new(MemoryCommentRepository::new()),
        friendships: Arc::new(MemoryFriendshipRepository::new()),
        friend_requests: Arc::new(MemoryFriendRequestRepository::new()),
        events: Arc::new(MemoryEventRepository::new()),
        goals: Arc::new(MemoryGoalRepository::new()),
    }
}

/// MongoDB adapters sharing one connected store.
#[must_use]
pub fn mongo_ports(store: &MongoStore) -> HttpStatePorts {
    HttpStatePorts {
        users: Arc::new(MongoUserRepository::new(store)),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        posts: Arc::new(MongoPostRepository::new(store)),
        comments: Arc::new(MongoCommentRepository::new(store)),
        friendships: Arc::new(MongoFriendshipRepository::new(store)),
        friend_requests: Arc::new(MongoFriendRequestRepository::new(store)),
        events: Arc::new(MongoEventRepository::new(store)),
        goals: Arc::new(MongoGoalRepository::new(store)),
    }
}
