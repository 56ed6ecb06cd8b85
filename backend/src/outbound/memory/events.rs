//! In-memory `EventRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{EventRepository, RepositoryError};
use crate::domain::{Event, EventId, UserId};

#[derive(Debug, Default)]
pub struct MemoryEventRepository {
    events: RwLock<HashMap<EventId, Event>>,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn insert(&self, event: &Event) -> Result<(), RepositoryError> {
        self.events.write().await.insert(event.id, event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, RepositoryError> {
        Ok(self.events.read().await.get(id).cloned())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Event>, RepositoryError> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .values()
            .filter(|event| event.user == *user)
            .cloned()
            .collect();
        events.sort_by_key(|event| (event.window.start(), event.date_created));
        Ok(events)
    }

    async fn replace(&self, expected: &Event, event: &Event) -> Result<bool, RepositoryError> {
        let mut events = self.events.write().await;
        Ok(match events.get_mut(&event.id) {
            Some(stored) if stored == expected => {
                *stored = event.clone();
                true
            }
            _ => false,
        })
    }

    async fn delete(&self, id: &EventId) -> Result<bool, RepositoryError> {
        Ok(self.events.write().await.remove(id).is_some())
    }
}
