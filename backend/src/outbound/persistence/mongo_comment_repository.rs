//! MongoDB-backed `CommentRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;

use crate::domain::ports::{CommentRepository, RepositoryError};
use crate::domain::{Comment, CommentId, CommentPatch, PostId};

use super::collection::DocCollection;
use super::documents::CommentDocument;
use super::mongo_error_mapping::{map_malformed, map_repository_error};
use super::patch_documents::comment_patch;
use super::store::{COMMENTS, MongoStore};

#[derive(Clone)]
pub struct MongoCommentRepository {
    comments: DocCollection<CommentDocument>,
}

impl MongoCommentRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            comments: store.collection(COMMENTS),
        }
    }
}

#[async_trait]
impl CommentRepository for MongoCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<(), RepositoryError> {
        self.comments
            .create_one(&CommentDocument::from(comment))
            .await
            .map_err(map_repository_error)
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        self.comments
            .read_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)?
            .map(|doc| Comment::try_from(doc).map_err(map_malformed))
            .transpose()
    }

    async fn list_for_post(&self, post: &PostId) -> Result<Vec<Comment>, RepositoryError> {
        self.comments
            .read_many(doc! { "post": post.to_string() }, doc! { "dateCreated": 1, "_id": 1 })
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(|doc| Comment::try_from(doc).map_err(map_malformed))
            .collect()
    }

    async fn update(
        &self,
        id: &CommentId,
        patch: &CommentPatch,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        self.comments
            .partial_update_one(doc! { "_id": id.to_string() }, comment_patch(patch, at)?)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, RepositoryError> {
        self.comments
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)
    }
}
