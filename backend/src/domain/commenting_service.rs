//! Commenting concept: comments attached to posts.
//!
//! The service does not know about posts beyond their id. Routes check that
//! the post exists through the Posting concept before creating a comment.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{CommentRepository, RepositoryError};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{Comment, CommentId, CommentOptions, CommentPatch, Error, PostId, UserId};

/// Service owning the `comments` collection.
#[derive(Clone)]
pub struct CommentingService {
    comments: Arc<dyn CommentRepository>,
    clock: Arc<dyn Clock>,
}

impl CommentingService {
    pub fn new(comments: Arc<dyn CommentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { comments, clock }
    }

    fn map_error(error: RepositoryError) -> Error {
        error.into_domain("comment")
    }

    fn missing(id: &CommentId) -> Error {
        Error::not_found(format!("Comment {id} does not exist!"))
    }

    pub async fn create(
        &self,
        post: PostId,
        author: UserId,
        content: &str,
        options: Option<CommentOptions>,
    ) -> Result<Comment, Error> {
        let content = required_text("content", content)?;
        let now = self.clock.utc();
        let comment = Comment {
            id: CommentId::generate(),
            post,
            author,
            content,
            options,
            date_created: now,
            date_updated: now,
        };
        self.comments
            .insert(&comment)
            .await
            .map_err(Self::map_error)?;
        info!(comment_id = %comment.id, post_id = %post, author = %author, "comment created");
        Ok(comment)
    }

    /// Comments on `post`, oldest first.
    pub async fn get_comments_for_post(&self, post: &PostId) -> Result<Vec<Comment>, Error> {
        self.comments
            .list_for_post(post)
            .await
            .map_err(Self::map_error)
    }

    pub async fn update(
        &self,
        id: &CommentId,
        content: Option<&str>,
        options: Option<CommentOptions>,
    ) -> Result<(), Error> {
        let patch = CommentPatch {
            content: optional_text("content", content)?,
            options,
        };
        let updated = self
            .comments
            .update(id, &patch, self.clock.utc())
            .await
            .map_err(Self::map_error)?;
        if !updated {
            return Err(Self::missing(id));
        }
        info!(comment_id = %id, "comment updated");
        Ok(())
    }

    pub async fn delete(&self, id: &CommentId) -> Result<(), Error> {
        if !self.comments.delete(id).await.map_err(Self::map_error)? {
            return Err(Self::missing(id));
        }
        info!(comment_id = %id, "comment deleted");
        Ok(())
    }

    pub async fn assert_author_is_user(&self, id: &CommentId, user: &UserId) -> Result<(), Error> {
        let comment = self
            .comments
            .find_by_id(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| Self::missing(id))?;
        if comment.author != *user {
            return Err(Error::forbidden(format!(
                "{user} is not the author of comment {id}!"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCommentRepository;
    use crate::domain::test_fixtures::fixture_clock;

    fn make_service(comments: MockCommentRepository) -> CommentingService {
        CommentingService::new(Arc::new(comments), fixture_clock())
    }

    #[tokio::test]
    async fn create_links_comment_to_post() {
        let post = PostId::generate();
        let mut comments = MockCommentRepository::new();
        comments
            .expect_insert()
            .withf(move |comment| comment.post == post && comment.content == "nice")
            .times(1)
            .return_once(|_| Ok(()));

        let comment = make_service(comments)
            .create(post, UserId::generate(), "nice ", None)
            .await
            .expect("comment created");
        assert_eq!(comment.post, post);
    }

    #[tokio::test]
    async fn listing_is_scoped_to_the_post() {
        let post = PostId::generate();
        let mut comments = MockCommentRepository::new();
        comments
            .expect_list_for_post()
            .withf(move |requested| *requested == post)
            .return_once(|_| Ok(Vec::new()));

        let listed = make_service(comments)
            .get_comments_for_post(&post)
            .await
            .expect("listed");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn update_missing_comment_is_not_found() {
        let id = CommentId::generate();
        let mut comments = MockCommentRepository::new();
        comments.expect_update().return_once(|_, _, _| Ok(false));

        let err = make_service(comments)
            .update(&id, Some("edited"), None)
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), format!("Comment {id} does not exist!"));
    }

    #[tokio::test]
    async fn assert_author_is_user_reports_missing_comment() {
        let mut comments = MockCommentRepository::new();
        comments.expect_find_by_id().return_once(|_| Ok(None));

        let err = make_service(comments)
            .assert_author_is_user(&CommentId::generate(), &UserId::generate())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn query_failures_are_internal() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_list_for_post()
            .return_once(|_| Err(RepositoryError::query("cursor died")));

        let err = make_service(comments)
            .get_comments_for_post(&PostId::generate())
            .await
            .expect_err("failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
