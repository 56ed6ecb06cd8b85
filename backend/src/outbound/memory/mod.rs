//! In-process adapters for every repository port.
//!
//! The server falls back to these when no MongoDB URI is configured, and
//! HTTP tests use them to exercise real concept services without a
//! database. Data lives for the lifetime of the process. Ordering matches
//! the MongoDB adapters.

mod events;
mod friending;
mod posts;
mod users;

pub use events::MemoryEventRepository;
pub use friending::{MemoryFriendRequestRepository, MemoryFriendshipRepository};
pub use posts::{MemoryCommentRepository, MemoryGoalRepository, MemoryPostRepository};
pub use users::MemoryUserRepository;
