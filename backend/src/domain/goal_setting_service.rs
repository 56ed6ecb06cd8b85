//! GoalSetting concept: personal goals with a completion flag.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{GoalRepository, RepositoryError};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{Error, Goal, GoalId, GoalOptions, GoalPatch, UserId};

/// Service owning the `goals` collection.
#[derive(Clone)]
pub struct GoalSettingService {
    goals: Arc<dyn GoalRepository>,
    clock: Arc<dyn Clock>,
}

impl GoalSettingService {
    pub fn new(goals: Arc<dyn GoalRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { goals, clock }
    }

    fn map_error(error: RepositoryError) -> Error {
        error.into_domain("goal")
    }

    fn missing(id: &GoalId) -> Error {
        Error::not_found(format!("Goal {id} does not exist!"))
    }

    pub async fn create(
        &self,
        author: UserId,
        content: &str,
        options: Option<GoalOptions>,
    ) -> Result<Goal, Error> {
        let content = required_text("content", content)?;
        let now = self.clock.utc();
        let goal = Goal {
            id: GoalId::generate(),
            author,
            content,
            options,
            date_created: now,
            date_updated: now,
        };
        self.goals.insert(&goal).await.map_err(Self::map_error)?;
        info!(goal_id = %goal.id, author = %goal.author, "goal created");
        Ok(goal)
    }

    /// Every goal, newest first.
    pub async fn get_goals(&self) -> Result<Vec<Goal>, Error> {
        self.goals.list(None).await.map_err(Self::map_error)
    }

    pub async fn get_by_author(&self, author: &UserId) -> Result<Vec<Goal>, Error> {
        self.goals.list(Some(*author)).await.map_err(Self::map_error)
    }

    pub async fn update(
        &self,
        id: &GoalId,
        content: Option<&str>,
        options: Option<GoalOptions>,
    ) -> Result<(), Error> {
        let patch = GoalPatch {
            content: optional_text("content", content)?,
            options,
        };
        let updated = self
            .goals
            .update(id, &patch, self.clock.utc())
            .await
            .map_err(Self::map_error)?;
        if !updated {
            return Err(Self::missing(id));
        }
        info!(goal_id = %id, "goal updated");
        Ok(())
    }

    pub async fn delete(&self, id: &GoalId) -> Result<(), Error> {
        if !self.goals.delete(id).await.map_err(Self::map_error)? {
            return Err(Self::missing(id));
        }
        info!(goal_id = %id, "goal deleted");
        Ok(())
    }

    pub async fn assert_author_is_user(&self, id: &GoalId, user: &UserId) -> Result<(), Error> {
        let goal = self
            .goals
            .find_by_id(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| Self::missing(id))?;
        if goal.author != *user {
            return Err(Error::forbidden(format!(
                "{user} is not the author of goal {id}!"
            )));
        }
        Ok(())
    }
}
