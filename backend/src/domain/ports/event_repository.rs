//! Port for calendar event persistence.

use async_trait::async_trait;

use crate::domain::{Event, EventId, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert(&self, event: &Event) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, RepositoryError>;

    /// Events owned by `user`, earliest start first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Event>, RepositoryError>;

    /// Overwrite the stored event, provided it still matches `expected`.
    /// Returns false when the event is gone or changed since it was read.
    /// Updates are merged and re-validated by the caller so the stored
    /// window always satisfies `start <= end`.
    async fn replace(&self, expected: &Event, event: &Event) -> Result<bool, RepositoryError>;

    async fn delete(&self, id: &EventId) -> Result<bool, RepositoryError>;
}
