//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data`. It holds one service per
//! concept; the concepts never reference each other, so any cross-concept
//! check (for example "the post exists before commenting") is composed in
//! the handler.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CommentRepository, CredentialHasher, EventRepository, FriendRequestRepository,
    FriendshipRepository, GoalRepository, PostRepository, UserRepository,
};
use crate::domain::{
    AuthenticatingService, CommentingService, FriendingService, GoalSettingService,
    PostingService, SchedulingService,
};

/// Parameter object bundling every port implementation.
///
/// Adapters are chosen by [`crate::composition`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub friendships: Arc<dyn FriendshipRepository>,
    pub friend_requests: Arc<dyn FriendRequestRepository>,
    pub events: Arc<dyn EventRepository>,
    pub goals: Arc<dyn GoalRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub authenticating: Arc<AuthenticatingService>,
    pub posting: Arc<PostingService>,
    pub commenting: Arc<CommentingService>,
    pub friending: Arc<FriendingService>,
    pub scheduling: Arc<SchedulingService>,
    pub goal_setting: Arc<GoalSettingService>,
}

impl HttpState {
    /// Wire each concept service to its ports and the shared clock.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use focusfeed::composition::memory_ports;
    /// use focusfeed::inbound::http::state::HttpState;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::new(memory_ports(), Arc::new(DefaultClock));
    /// let _ = state.posting.clone();
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts, clock: Arc<dyn Clock>) -> Self {
        let HttpStatePorts {
            users,
            hasher,
            posts,
            comments,
            friendships,
            friend_requests,
            events,
            goals,
        } = ports;

        Self {
            authenticating: Arc::new(AuthenticatingService::new(users, hasher, clock.clone())),
            posting: Arc::new(PostingService::new(posts, clock.clone())),
            commenting: Arc::new(CommentingService::new(comments, clock.clone())),
            friending: Arc::new(FriendingService::new(
                friendships,
                friend_requests,
                clock.clone(),
            )),
            scheduling: Arc::new(SchedulingService::new(events, clock.clone())),
            goal_setting: Arc::new(GoalSettingService::new(goals, clock)),
        }
    }
}
