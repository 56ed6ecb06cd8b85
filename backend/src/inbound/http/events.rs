//! Calendar event handlers.
//!
//! ```text
//! GET /api/events?author=ada
//! POST /api/events {"name":"Deep work","startTime":"2026-01-05T09:00:00Z",
//!                   "endTime":"2026-01-05T11:00:00Z","type":"focus"}
//! PATCH /api/events/{id} {"endTime":"2026-01-05T12:00:00Z"}
//! DELETE /api/events/{id}
//! ```

use actix_web::{delete, get, patch, post, web};
use serde::Deserialize;

use crate::domain::{Error, EventId, EventKind, EventOptions, EventPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{
    EventCreatedResponse, EventView, MessageResponse, event_views, single,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_id, parse_optional_rfc3339_timestamp, parse_rfc3339_timestamp, require,
};

const EVENT_ID: FieldName = FieldName::new("id");
const AUTHOR: FieldName = FieldName::new("author");
const START_TIME: FieldName = FieldName::new("startTime");
const END_TIME: FieldName = FieldName::new("endTime");

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventsQuery {
    /// Username whose events to list.
    pub author: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub name: String,
    #[schema(example = "2026-01-05T09:00:00Z")]
    pub start_time: String,
    #[schema(example = "2026-01-05T11:00:00Z")]
    pub end_time: String,
    #[serde(default, rename = "type")]
    pub kind: Option<EventKind>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub options: Option<EventOptions>,
}

impl UpdateEventRequest {
    fn into_patch(self) -> Result<EventPatch, Error> {
        Ok(EventPatch {
            start_time: parse_optional_rfc3339_timestamp(self.start_time.as_deref(), START_TIME)?,
            end_time: parse_optional_rfc3339_timestamp(self.end_time.as_deref(), END_TIME)?,
            name: self.name,
            options: self.options,
        })
    }
}

/// A user's events, earliest start first.
#[utoipa::path(
    get,
    path = "/api/events",
    params(EventsQuery),
    responses(
        (status = 200, description = "Events", body = [EventView]),
        (status = 400, description = "Missing author", body = Error),
        (status = 404, description = "Unknown author", body = Error)
    ),
    tags = ["events"],
    operation_id = "getEvents",
    security([])
)]
#[get("/events")]
pub async fn get_events(
    state: web::Data<HttpState>,
    query: web::Query<EventsQuery>,
) -> ApiResult<web::Json<Vec<EventView>>> {
    let author = require(
        query.author.as_deref().filter(|author| !author.is_empty()),
        AUTHOR,
    )?;
    let author = state.authenticating.get_user_by_username(author).await?;
    let events = state.scheduling.get_events_by_user(&author.id).await?;
    Ok(web::Json(event_views(&state.authenticating, events).await?))
}

/// Schedule an event for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created", body = EventCreatedResponse),
        (status = 400, description = "Blank name, bad timestamp or inverted window", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/events")]
pub async fn create_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateEventRequest>,
) -> ApiResult<web::Json<EventCreatedResponse>> {
    let user = session.get_user()?;
    let CreateEventRequest {
        name,
        start_time,
        end_time,
        kind,
    } = payload.into_inner();
    let start = parse_rfc3339_timestamp(&start_time, START_TIME)?;
    let end = parse_rfc3339_timestamp(&end_time, END_TIME)?;
    let event = state
        .scheduling
        .create(user, &name, start, end, EventOptions { kind })
        .await?;
    let event = single(event, |events| event_views(&state.authenticating, events)).await?;
    Ok(web::Json(EventCreatedResponse {
        msg: "Event successfully created!".to_owned(),
        event,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/events/{id}",
    params(("id" = String, Path, description = "Event id")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = MessageResponse),
        (status = 400, description = "Invalid id, timestamp or window", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such event", body = Error),
        (status = 409, description = "Event kept changing during the update", body = Error)
    ),
    tags = ["events"],
    operation_id = "updateEvent"
)]
#[patch("/events/{id}")]
pub async fn update_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<String>,
    payload: web::Json<UpdateEventRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let id: EventId = parse_id(&id, EVENT_ID)?;
    let patch = payload.into_inner().into_patch()?;
    state.scheduling.assert_user_is_owner(&id, &user).await?;
    state.scheduling.update(&id, patch).await?;
    Ok(web::Json(MessageResponse::new("Event successfully updated!")))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such event", body = Error)
    ),
    tags = ["events"],
    operation_id = "deleteEvent"
)]
#[delete("/events/{id}")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let id: EventId = parse_id(&id, EVENT_ID)?;
    state.scheduling.assert_user_is_owner(&id, &user).await?;
    state.scheduling.delete(&id).await?;
    Ok(web::Json(MessageResponse::new("Event deleted successfully!")))
}
