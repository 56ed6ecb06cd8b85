//! Posting concept: user-authored posts.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{PostRepository, RepositoryError};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{Error, Post, PostId, PostOptions, PostPatch, UserId};

/// Service owning the `posts` collection.
#[derive(Clone)]
pub struct PostingService {
    posts: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
}

impl PostingService {
    pub fn new(posts: Arc<dyn PostRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }

    fn map_error(error: RepositoryError) -> Error {
        error.into_domain("post")
    }

    fn missing(id: &PostId) -> Error {
        Error::not_found(format!("Post {id} does not exist!"))
    }

    /// Publish a post. Content is trimmed and must not be blank.
    pub async fn create(
        &self,
        author: UserId,
        content: &str,
        options: Option<PostOptions>,
    ) -> Result<Post, Error> {
        let content = required_text("content", content)?;
        let now = self.clock.utc();
        let post = Post {
            id: PostId::generate(),
            author,
            content,
            options,
            date_created: now,
            date_updated: now,
        };
        self.posts.insert(&post).await.map_err(Self::map_error)?;
        info!(post_id = %post.id, author = %post.author, "post created");
        Ok(post)
    }

    /// Every post, newest first.
    pub async fn get_posts(&self) -> Result<Vec<Post>, Error> {
        self.posts.list(None).await.map_err(Self::map_error)
    }

    /// Posts by `author`, newest first.
    pub async fn get_by_author(&self, author: &UserId) -> Result<Vec<Post>, Error> {
        self.posts.list(Some(*author)).await.map_err(Self::map_error)
    }

    /// Apply a partial update. Absent fields keep their stored value.
    pub async fn update(
        &self,
        id: &PostId,
        content: Option<&str>,
        options: Option<PostOptions>,
    ) -> Result<(), Error> {
        let patch = PostPatch {
            content: optional_text("content", content)?,
            options,
        };
        let updated = self
            .posts
            .update(id, &patch, self.clock.utc())
            .await
            .map_err(Self::map_error)?;
        if !updated {
            return Err(Self::missing(id));
        }
        info!(post_id = %id, "post updated");
        Ok(())
    }

    pub async fn delete(&self, id: &PostId) -> Result<(), Error> {
        let deleted = self.posts.delete(id).await.map_err(Self::map_error)?;
        if !deleted {
            return Err(Self::missing(id));
        }
        info!(post_id = %id, "post deleted");
        Ok(())
    }

    /// Fetch a post or fail with `not_found`.
    pub async fn assert_exists(&self, id: &PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| Self::missing(id))
    }

    /// Ensure `user` wrote the post.
    pub async fn assert_author_is_user(&self, id: &PostId, user: &UserId) -> Result<(), Error> {
        let post = self.assert_exists(id).await?;
        if post.author != *user {
            return Err(Error::forbidden(format!(
                "{user} is not the author of post {id}!"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockPostRepository;
    use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp};
    use rstest::rstest;

    fn make_service(posts: MockPostRepository) -> PostingService {
        PostingService::new(Arc::new(posts), fixture_clock())
    }

    fn stored_post(author: UserId) -> Post {
        Post {
            id: PostId::generate(),
            author,
            content: "hello".to_owned(),
            options: None,
            date_created: fixture_timestamp(),
            date_updated: fixture_timestamp(),
        }
    }

    #[tokio::test]
    async fn create_trims_content_and_stamps_dates() {
        let author = UserId::generate();
        let mut posts = MockPostRepository::new();
        posts
            .expect_insert()
            .withf(move |post| post.content == "hello" && post.author == author)
            .times(1)
            .return_once(|_| Ok(()));

        let post = make_service(posts)
            .create(author, "  hello  ", None)
            .await
            .expect("post created");
        assert_eq!(post.date_created, fixture_timestamp());
        assert_eq!(post.date_updated, post.date_created);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn create_rejects_blank_content(#[case] content: &str) {
        let mut posts = MockPostRepository::new();
        posts.expect_insert().never();

        let err = make_service(posts)
            .create(UserId::generate(), content, None)
            .await
            .expect_err("blank");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn get_by_author_filters_on_author() {
        let author = UserId::generate();
        let mut posts = MockPostRepository::new();
        posts
            .expect_list()
            .withf(move |filter| *filter == Some(author))
            .return_once(move |_| Ok(vec![stored_post(author)]));

        let found = make_service(posts)
            .get_by_author(&author)
            .await
            .expect("listed");
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn update_passes_only_present_fields() {
        let id = PostId::generate();
        let mut posts = MockPostRepository::new();
        posts
            .expect_update()
            .withf(|_, patch, at| {
                patch.content.is_none()
                    && patch.options
                        == Some(PostOptions {
                            background_color: Some("#fff".to_owned()),
                        })
                    && *at == fixture_timestamp()
            })
            .return_once(|_, _, _| Ok(true));

        make_service(posts)
            .update(
                &id,
                None,
                Some(PostOptions {
                    background_color: Some("#fff".to_owned()),
                }),
            )
            .await
            .expect("updated");
    }

    #[tokio::test]
    async fn delete_missing_post_is_not_found() {
        let id = PostId::generate();
        let mut posts = MockPostRepository::new();
        posts.expect_delete().return_once(|_| Ok(false));

        let err = make_service(posts).delete(&id).await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), format!("Post {id} does not exist!"));
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::Forbidden))]
    #[tokio::test]
    async fn assert_author_is_user_checks_ownership(
        #[case] is_author: bool,
        #[case] expected: Option<ErrorCode>,
    ) {
        let author = UserId::generate();
        let post = stored_post(author);
        let id = post.id;
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(post)));
        let caller = if is_author { author } else { UserId::generate() };

        let result = make_service(posts).assert_author_is_user(&id, &caller).await;
        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[tokio::test]
    async fn assert_author_is_user_reports_missing_post() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().return_once(|_| Ok(None));

        let err = make_service(posts)
            .assert_author_is_user(&PostId::generate(), &UserId::generate())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
