//! MongoDB-backed `EventRepository` over the `schedule` collection.

use async_trait::async_trait;
use mongodb::bson::{self, Document, doc};

use crate::domain::ports::{EventRepository, RepositoryError};
use crate::domain::{Event, EventId, UserId};

use super::collection::DocCollection;
use super::documents::EventDocument;
use super::mongo_error_mapping::{map_malformed, map_repository_error};
use super::store::{MongoStore, SCHEDULE};

#[derive(Clone)]
pub struct MongoEventRepository {
    events: DocCollection<EventDocument>,
}

impl MongoEventRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            events: store.collection(SCHEDULE),
        }
    }
}

/// Matches the event only while its mutable fields still hold the values read.
fn unchanged(expected: &Event) -> Result<Document, RepositoryError> {
    let kind = bson::to_bson(&expected.options.kind)
        .map_err(|err| RepositoryError::query(format!("failed to encode kind: {err}")))?;
    Ok(doc! {
        "_id": expected.id.to_string(),
        "name": &expected.name,
        "startTime": bson::DateTime::from_chrono(expected.window.start()),
        "endTime": bson::DateTime::from_chrono(expected.window.end()),
        "options.kind": kind,
        "dateUpdated": bson::DateTime::from_chrono(expected.date_updated),
    })
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    async fn insert(&self, event: &Event) -> Result<(), RepositoryError> {
        self.events
            .create_one(&EventDocument::from(event))
            .await
            .map_err(map_repository_error)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, RepositoryError> {
        self.events
            .read_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)?
            .map(|doc| Event::try_from(doc).map_err(map_malformed))
            .transpose()
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Event>, RepositoryError> {
        self.events
            .read_many(doc! { "user": user.to_string() }, doc! { "startTime": 1 })
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(|doc| Event::try_from(doc).map_err(map_malformed))
            .collect()
    }

    async fn replace(&self, expected: &Event, event: &Event) -> Result<bool, RepositoryError> {
        self.events
            .replace_one(unchanged(expected)?, &EventDocument::from(event))
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: &EventId) -> Result<bool, RepositoryError> {
        self.events
            .delete_one(doc! { "_id": id.to_string() })
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::fixture_timestamp;
    use crate::domain::{EventKind, EventOptions, EventWindow};
    use chrono::Duration;

    #[test]
    fn unchanged_pins_every_mutable_field() {
        let start = fixture_timestamp();
        let event = Event {
            id: EventId::generate(),
            user: UserId::generate(),
            name: "standup".to_owned(),
            window: EventWindow::new(start, start + Duration::hours(1)).expect("window"),
            options: EventOptions::default(),
            date_created: start,
            date_updated: start,
        };

        let filter = unchanged(&event).expect("filter");
        assert_eq!(filter.get_str("_id").ok(), Some(event.id.to_string().as_str()));
        assert_eq!(filter.get_str("name").ok(), Some("standup"));
        assert_eq!(filter.get("options.kind"), Some(&bson::Bson::Null));
        assert!(filter.get_datetime("dateUpdated").is_ok());
        assert!(!filter.contains_key("user"));

        let focused = Event {
            options: EventOptions {
                kind: Some(EventKind::Focus),
            },
            ..event
        };
        let filter = unchanged(&focused).expect("filter");
        assert_eq!(filter.get_str("options.kind").ok(), Some("focus"));
    }
}
