//! Port for goal persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Goal, GoalId, GoalPatch, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoalRepository: Send + Sync {
    async fn insert(&self, goal: &Goal) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &GoalId) -> Result<Option<Goal>, RepositoryError>;

    /// Goals newest first, optionally restricted to one author.
    async fn list(&self, author: Option<UserId>) -> Result<Vec<Goal>, RepositoryError>;

    async fn update(
        &self,
        id: &GoalId,
        patch: &GoalPatch,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: &GoalId) -> Result<bool, RepositoryError>;
}
