//! MongoDB-backed `GoalRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;

use crate::domain::ports::{GoalRepository, RepositoryError};
use crate::domain::{Goal, GoalId, GoalPatch, UserId};

use super::collection::DocCollection;
use super::documents::GoalDocument;
use super::mongo_error_mapping::{map_malformed, map_repository_error};
use super::patch_documents::goal_patch;
use super::store::{GOALS, MongoStore};

#[derive(Clone)]
pub struct MongoGoalRepository {
    goals: DocCollection<GoalDocument>,
}

impl MongoGoalRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            goals: store.collection(GOALS),
        }
    }
}

#[async_trait]
impl GoalRepository for MongoGoalRepository {
    async fn insert(&self, goal: &Goal) -> Result<(), RepositoryError> {
        self.goals
            .create_one(&GoalDocument::from(goal))
            .await
            .map_err(map_repository_error)
    }

    async fn find_by_id(&self, id: &GoalId) -> Result<Option<Goal>, RepositoryError> {
        self.goals
            .read_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)?
            .map(|doc| Goal::try_from(doc).map_err(map_malformed))
            .transpose()
    }

    async fn list(&self, author: Option<UserId>) -> Result<Vec<Goal>, RepositoryError> {
        let filter = author.map_or_else(|| doc! {}, |author| doc! { "author": author.to_string() });
        self.goals
            .read_many(filter, doc! { "dateCreated": -1, "_id": -1 })
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(|doc| Goal::try_from(doc).map_err(map_malformed))
            .collect()
    }

    async fn update(
        &self,
        id: &GoalId,
        patch: &GoalPatch,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        self.goals
            .partial_update_one(doc! { "_id": id.to_string() }, goal_patch(patch, at)?)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: &GoalId) -> Result<bool, RepositoryError> {
        self.goals
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)
    }
}
