//! Port for post persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Post, PostId, PostPatch, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a new post.
    async fn insert(&self, post: &Post) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError>;

    /// Posts newest first, optionally restricted to one author.
    async fn list(&self, author: Option<UserId>) -> Result<Vec<Post>, RepositoryError>;

    /// Apply the fields present in `patch` and stamp `dateUpdated`.
    /// Returns `false` when the post does not exist.
    async fn update(
        &self,
        id: &PostId,
        patch: &PostPatch,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: &PostId) -> Result<bool, RepositoryError>;
}
