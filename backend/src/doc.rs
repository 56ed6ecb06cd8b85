//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every `/api` handler, the health probes and the
//! session cookie security scheme. The document backs Swagger UI in debug
//! builds and is printed by `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    CommentOptions, Error, ErrorCode, EventKind, EventOptions, FriendRequestStatus, GoalOptions,
    PostOptions, User,
};
use crate::inbound::http::{comments, events, friends, goals, health, posts, responses, users};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "FocusFeed API",
        description = "Session-authenticated social feed with posts, comments, friends, \
                       a calendar and goals."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        users::current_session,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_username,
        users::update_password,
        users::delete_user,
        users::login,
        users::logout,
        posts::get_posts,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        comments::get_comments,
        comments::create_comment,
        comments::update_comment,
        comments::delete_comment,
        friends::get_friends,
        friends::remove_friend,
        friends::get_requests,
        friends::send_request,
        friends::remove_request,
        friends::accept_request,
        friends::reject_request,
        events::get_events,
        events::create_event,
        events::update_event,
        events::delete_event,
        goals::get_goals,
        goals::create_goal,
        goals::update_goal,
        goals::delete_goal,
        health::ready,
        health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        PostOptions,
        CommentOptions,
        EventKind,
        EventOptions,
        GoalOptions,
        FriendRequestStatus,
        responses::MessageResponse,
        responses::UserCreatedResponse,
        responses::PostView,
        responses::PostCreatedResponse,
        responses::CommentView,
        responses::CommentCreatedResponse,
        responses::FriendRequestView,
        responses::EventView,
        responses::EventCreatedResponse,
        responses::GoalView,
        responses::GoalCreatedResponse,
        users::CredentialsRequest,
        users::UpdateUsernameRequest,
        users::UpdatePasswordRequest,
        posts::CreatePostRequest,
        posts::UpdatePostRequest,
        comments::CreateCommentRequest,
        comments::UpdateCommentRequest,
        events::CreateEventRequest,
        events::UpdateEventRequest,
        goals::CreateGoalRequest,
        goals::UpdateGoalRequest,
    )),
    tags(
        (name = "users", description = "Accounts and sessions"),
        (name = "posts", description = "The shared feed"),
        (name = "comments", description = "Comments on posts"),
        (name = "friends", description = "Friendships and friend requests"),
        (name = "events", description = "Calendar events"),
        (name = "goals", description = "Personal goals"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
