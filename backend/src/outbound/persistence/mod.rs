//! MongoDB persistence adapters.
//!
//! # Architecture
//!
//! - **Thin adapters**: each repository only translates between BSON
//!   documents (`documents.rs`) and domain types. No business logic lives
//!   here.
//! - **One collection per concept**: concepts never join across
//!   collections, so every adapter owns exactly one [`DocCollection`]
//!   (friending owns two).
//! - **Strongly typed errors**: driver failures map to the port error
//!   enums; unreachable servers become connection errors.
//!
//! # Example
//!
//! ```ignore
//! use focusfeed::outbound::persistence::{MongoStore, MongoPostRepository, StoreConfig};
//!
//! let store = MongoStore::connect(&StoreConfig::new("mongodb://localhost", "focusfeed")).await?;
//! let posts = MongoPostRepository::new(&store);
//! ```

mod collection;
mod documents;
mod mongo_comment_repository;
mod mongo_error_mapping;
mod mongo_event_repository;
mod mongo_friendship_repository;
mod mongo_goal_repository;
mod mongo_post_repository;
mod mongo_user_repository;
mod patch_documents;
mod store;

pub use collection::{DocCollection, MongoResult};
pub use documents::MalformedDocument;
pub use mongo_comment_repository::MongoCommentRepository;
pub use mongo_event_repository::MongoEventRepository;
pub use mongo_friendship_repository::{MongoFriendRequestRepository, MongoFriendshipRepository};
pub use mongo_goal_repository::MongoGoalRepository;
pub use mongo_post_repository::MongoPostRepository;
pub use mongo_user_repository::MongoUserRepository;
pub use store::{MongoStore, StoreConfig, StoreError};
