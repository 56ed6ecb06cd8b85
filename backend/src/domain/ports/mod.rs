//! Domain ports for the hexagonal boundary.
//!
//! Each repository trait exposes strongly typed errors so adapters map their
//! failures into predictable variants. Services translate those variants
//! into [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod credential_hasher;
mod event_repository;
mod friendship_repository;
mod goal_repository;
mod post_repository;
mod repository_error;
mod user_repository;

pub use comment_repository::CommentRepository;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use event_repository::EventRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use friendship_repository::{FriendRequestRepository, FriendshipRepository};
#[cfg(test)]
pub use friendship_repository::{MockFriendRequestRepository, MockFriendshipRepository};
pub use goal_repository::GoalRepository;
#[cfg(test)]
pub use goal_repository::MockGoalRepository;
pub use post_repository::PostRepository;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
