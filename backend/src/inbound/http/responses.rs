//! Response bodies.
//!
//! Stored documents reference users by id; every view sent to the client
//! carries usernames instead. Missing users render as `DELETED_USER`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatingService, Comment, CommentId, CommentOptions, Error, Event, EventId,
    EventOptions, FriendRequest, FriendRequestId, FriendRequestStatus, Goal, GoalId, GoalOptions,
    Post, PostId, PostOptions, User, UserId,
};

/// `{ "msg": ... }` acknowledgement.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logged in!")]
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserCreatedResponse {
    #[schema(example = "User created successfully!")]
    pub msg: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[schema(value_type = String)]
    pub id: PostId,
    #[schema(example = "ada")]
    pub author: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<PostOptions>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostCreatedResponse {
    #[schema(example = "Post successfully created!")]
    pub msg: String,
    pub post: PostView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[schema(value_type = String)]
    pub id: CommentId,
    #[schema(value_type = String)]
    pub post_id: PostId,
    #[schema(example = "ada")]
    pub author: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<CommentOptions>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentCreatedResponse {
    #[schema(example = "Comment successfully created!")]
    pub msg: String,
    pub comment: CommentView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestView {
    #[schema(value_type = String)]
    pub id: FriendRequestId,
    #[schema(example = "ada")]
    pub from: String,
    #[schema(example = "grace")]
    pub to: String,
    pub status: FriendRequestStatus,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[schema(value_type = String)]
    pub id: EventId,
    /// Username of the owner.
    #[schema(example = "ada")]
    pub user: String,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub options: EventOptions,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventCreatedResponse {
    #[schema(example = "Event successfully created!")]
    pub msg: String,
    pub event: EventView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    #[schema(value_type = String)]
    pub id: GoalId,
    #[schema(example = "ada")]
    pub author: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GoalOptions>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GoalCreatedResponse {
    #[schema(example = "Goal successfully created!")]
    pub msg: String,
    pub goal: GoalView,
}

/// Resolve the user referenced by each item, preserving order.
async fn resolve<T>(
    auth: &AuthenticatingService,
    items: &[T],
    user_of: impl Fn(&T) -> UserId,
) -> Result<Vec<String>, Error> {
    let ids: Vec<UserId> = items.iter().map(user_of).collect();
    auth.ids_to_usernames(&ids).await
}

pub(crate) async fn post_views(
    auth: &AuthenticatingService,
    posts: Vec<Post>,
) -> Result<Vec<PostView>, Error> {
    let authors = resolve(auth, &posts, |post| post.author).await?;
    Ok(posts
        .into_iter()
        .zip(authors)
        .map(|(post, author)| PostView {
            id: post.id,
            author,
            content: post.content,
            options: post.options,
            date_created: post.date_created,
            date_updated: post.date_updated,
        })
        .collect())
}

pub(crate) async fn comment_views(
    auth: &AuthenticatingService,
    comments: Vec<Comment>,
) -> Result<Vec<CommentView>, Error> {
    let authors = resolve(auth, &comments, |comment| comment.author).await?;
    Ok(comments
        .into_iter()
        .zip(authors)
        .map(|(comment, author)| CommentView {
            id: comment.id,
            post_id: comment.post,
            author,
            content: comment.content,
            options: comment.options,
            date_created: comment.date_created,
            date_updated: comment.date_updated,
        })
        .collect())
}

pub(crate) async fn friend_request_views(
    auth: &AuthenticatingService,
    requests: Vec<FriendRequest>,
) -> Result<Vec<FriendRequestView>, Error> {
    let ids: Vec<UserId> = requests
        .iter()
        .flat_map(|request| [request.from, request.to])
        .collect();
    let mut names = auth.ids_to_usernames(&ids).await?.into_iter();
    let mut views = Vec::with_capacity(requests.len());
    for request in requests {
        let (Some(from), Some(to)) = (names.next(), names.next()) else {
            return Err(Error::internal("username lookup returned too few entries"));
        };
        views.push(FriendRequestView {
            id: request.id,
            from,
            to,
            status: request.status,
            date_created: request.date_created,
            date_updated: request.date_updated,
        });
    }
    Ok(views)
}

pub(crate) async fn event_views(
    auth: &AuthenticatingService,
    events: Vec<Event>,
) -> Result<Vec<EventView>, Error> {
    let owners = resolve(auth, &events, |event| event.user).await?;
    Ok(events
        .into_iter()
        .zip(owners)
        .map(|(event, user)| EventView {
            id: event.id,
            user,
            name: event.name,
            start_time: event.window.start(),
            end_time: event.window.end(),
            options: event.options,
            date_created: event.date_created,
            date_updated: event.date_updated,
        })
        .collect())
}

pub(crate) async fn goal_views(
    auth: &AuthenticatingService,
    goals: Vec<Goal>,
) -> Result<Vec<GoalView>, Error> {
    let authors = resolve(auth, &goals, |goal| goal.author).await?;
    Ok(goals
        .into_iter()
        .zip(authors)
        .map(|(goal, author)| GoalView {
            id: goal.id,
            author,
            content: goal.content,
            options: goal.options,
            date_created: goal.date_created,
            date_updated: goal.date_updated,
        })
        .collect())
}

/// Render a single item through one of the batch view builders.
pub(crate) async fn single<T, V, F, Fut>(item: T, build: F) -> Result<V, Error>
where
    F: FnOnce(Vec<T>) -> Fut,
    Fut: std::future::Future<Output = Result<Vec<V>, Error>>,
{
    build(vec![item])
        .await?
        .pop()
        .ok_or_else(|| Error::internal("view builder returned no entries"))
}
