//! Scheduling concept: calendar events owned by a single user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{EventRepository, RepositoryError};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{
    Error, Event, EventId, EventOptions, EventPatch, EventWindow, EventWindowError, UserId,
};

const UPDATE_ATTEMPTS: usize = 3;

/// Service owning the `schedule` collection.
#[derive(Clone)]
pub struct SchedulingService {
    events: Arc<dyn EventRepository>,
    clock: Arc<dyn Clock>,
}

impl SchedulingService {
    pub fn new(events: Arc<dyn EventRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { events, clock }
    }

    fn map_error(error: RepositoryError) -> Error {
        error.into_domain("event")
    }

    fn missing(id: &EventId) -> Error {
        Error::not_found(format!("Event {id} does not exist!"))
    }

    fn invalid_window(error: &EventWindowError) -> Error {
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": "endTime",
            "code": "end_before_start",
        }))
    }

    async fn find(&self, id: &EventId) -> Result<Event, Error> {
        self.events
            .find_by_id(id)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| Self::missing(id))
    }

    /// Schedule a new event. `end` must not precede `start`.
    pub async fn create(
        &self,
        user: UserId,
        name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        options: EventOptions,
    ) -> Result<Event, Error> {
        let name = required_text("name", name)?;
        let window = EventWindow::new(start, end).map_err(|err| Self::invalid_window(&err))?;
        let now = self.clock.utc();
        let event = Event {
            id: EventId::generate(),
            user,
            name,
            window,
            options,
            date_created: now,
            date_updated: now,
        };
        self.events.insert(&event).await.map_err(Self::map_error)?;
        info!(event_id = %event.id, user = %user, "event created");
        Ok(event)
    }

    /// Events owned by `user`, earliest start first.
    pub async fn get_events_by_user(&self, user: &UserId) -> Result<Vec<Event>, Error> {
        self.events
            .list_for_user(user)
            .await
            .map_err(Self::map_error)
    }

    /// Merge `patch` into the stored event and re-check the window.
    ///
    /// The write only lands if the event is unchanged since it was read.
    /// Otherwise the merge is redone against the fresh copy.
    pub async fn update(&self, id: &EventId, patch: EventPatch) -> Result<(), Error> {
        for _ in 0..UPDATE_ATTEMPTS {
            let stored = self.find(id).await?;
            let event = self.merge(&stored, &patch)?;
            if self.events.replace(&stored, &event).await.map_err(Self::map_error)? {
                info!(event_id = %id, "event updated");
                return Ok(());
            }
            debug!(event_id = %id, "event changed during update; retrying");
        }
        Err(Error::conflict(format!("Event {id} was modified concurrently!")))
    }

    fn merge(&self, stored: &Event, patch: &EventPatch) -> Result<Event, Error> {
        let mut event = stored.clone();
        if let Some(name) = optional_text("name", patch.name.as_deref())? {
            event.name = name;
        }
        let start = patch.start_time.unwrap_or_else(|| event.window.start());
        let end = patch.end_time.unwrap_or_else(|| event.window.end());
        event.window = EventWindow::new(start, end).map_err(|err| Self::invalid_window(&err))?;
        if let Some(options) = patch.options {
            event.options = options;
        }
        event.date_updated = self.clock.utc();
        Ok(event)
    }

    pub async fn delete(&self, id: &EventId) -> Result<(), Error> {
        if !self.events.delete(id).await.map_err(Self::map_error)? {
            return Err(Self::missing(id));
        }
        info!(event_id = %id, "event deleted");
        Ok(())
    }

    pub async fn assert_user_is_owner(&self, id: &EventId, user: &UserId) -> Result<(), Error> {
        let event = self.find(id).await?;
        if event.user != *user {
            return Err(Error::forbidden(format!(
                "{user} is not the owner of event {id}!"
            )));
        }
        Ok(())
    }
}
