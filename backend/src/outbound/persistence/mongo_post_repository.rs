//! MongoDB-backed `PostRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;

use crate::domain::ports::{PostRepository, RepositoryError};
use crate::domain::{Post, PostId, PostPatch, UserId};

use super::collection::DocCollection;
use super::documents::PostDocument;
use super::mongo_error_mapping::{map_malformed, map_repository_error};
use super::patch_documents::post_patch;
use super::store::{MongoStore, POSTS};

#[derive(Clone)]
pub struct MongoPostRepository {
    posts: DocCollection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            posts: store.collection(POSTS),
        }
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), RepositoryError> {
        self.posts
            .create_one(&PostDocument::from(post))
            .await
            .map_err(map_repository_error)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        self.posts
            .read_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)?
            .map(|doc| Post::try_from(doc).map_err(map_malformed))
            .transpose()
    }

    async fn list(&self, author: Option<UserId>) -> Result<Vec<Post>, RepositoryError> {
        let filter = match author {
            Some(author) => doc! { "author": author.to_string() },
            None => doc! {},
        };
        self.posts
            .read_many(filter, doc! { "dateCreated": -1, "_id": -1 })
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(|doc| Post::try_from(doc).map_err(map_malformed))
            .collect()
    }

    async fn update(
        &self,
        id: &PostId,
        patch: &PostPatch,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        self.posts
            .partial_update_one(doc! { "_id": id.to_string() }, post_patch(patch, at)?)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: &PostId) -> Result<bool, RepositoryError> {
        self.posts
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)
    }
}
