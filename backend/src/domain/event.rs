//! Calendar events.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, UserId};

/// What an event is for. Focus events drive the client's focus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Focus,
    Social,
}

/// Optional event metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventOptions {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
}

/// Raised when an event would end before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindowError {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl fmt::Display for EventWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "endTime {} must not precede startTime {}",
            self.end.to_rfc3339(),
            self.start.to_rfc3339()
        )
    }
}

impl std::error::Error for EventWindowError {}

/// Start/end pair with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl EventWindow {
    /// Validate the ordering of `start` and `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EventWindowError> {
        if end < start {
            return Err(EventWindowError { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub user: UserId,
    pub name: String,
    pub window: EventWindow,
    pub options: EventOptions,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Partial update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub options: Option<EventOptions>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 1, hour, 0, 0).single().expect("timestamp")
    }

    #[test]
    fn window_allows_zero_length() {
        let window = EventWindow::new(at(9), at(9)).expect("instant event");
        assert_eq!(window.start(), window.end());
    }

    #[test]
    fn window_rejects_reversed_times() {
        let err = EventWindow::new(at(10), at(9)).expect_err("reversed");
        assert!(err.to_string().starts_with("endTime 2024-10-01T09:00:00"));
    }

    #[test]
    fn options_use_type_key() {
        let options: EventOptions =
            serde_json::from_value(serde_json::json!({ "type": "focus" })).expect("parse");
        assert_eq!(options.kind, Some(EventKind::Focus));
        let empty: EventOptions = serde_json::from_value(serde_json::json!({})).expect("parse");
        assert_eq!(empty.kind, None);
    }
}
