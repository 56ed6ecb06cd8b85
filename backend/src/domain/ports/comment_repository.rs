//! Port for comment persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Comment, CommentId, CommentPatch, PostId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError>;

    /// Comments on `post`, oldest first.
    async fn list_for_post(&self, post: &PostId) -> Result<Vec<Comment>, RepositoryError>;

    /// Apply the fields present in `patch`. Returns `false` when missing.
    async fn update(
        &self,
        id: &CommentId,
        patch: &CommentPatch,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: &CommentId) -> Result<bool, RepositoryError>;
}
