//! Comment handlers.
//!
//! Commenting knows nothing about posts; creating a comment first asks
//! Posting whether the target post exists.

use actix_web::{delete, get, patch, post, web};
use serde::Deserialize;

use crate::domain::{CommentId, CommentOptions, Error, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{
    CommentCreatedResponse, CommentView, MessageResponse, comment_views, single,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, require};

const COMMENT_ID: FieldName = FieldName::new("id");
const POST_ID: FieldName = FieldName::new("postId");

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CommentsQuery {
    /// Post whose comments to list.
    pub post_id: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub post_id: String,
    pub content: String,
    #[serde(default)]
    pub options: Option<CommentOptions>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub options: Option<CommentOptions>,
}

/// Comments on a post, oldest first.
#[utoipa::path(
    get,
    path = "/api/comments",
    params(CommentsQuery),
    responses(
        (status = 200, description = "Comments", body = [CommentView]),
        (status = 400, description = "Missing or invalid postId", body = Error)
    ),
    tags = ["comments"],
    operation_id = "getComments",
    security([])
)]
#[get("/comments")]
pub async fn get_comments(
    state: web::Data<HttpState>,
    query: web::Query<CommentsQuery>,
) -> ApiResult<web::Json<Vec<CommentView>>> {
    let raw = require(query.post_id.as_deref(), POST_ID)?;
    let post: PostId = parse_id(raw, POST_ID)?;
    let comments = state.commenting.get_comments_for_post(&post).await?;
    Ok(web::Json(
        comment_views(&state.authenticating, comments).await?,
    ))
}

/// Comment on an existing post as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment created", body = CommentCreatedResponse),
        (status = 400, description = "Invalid postId or blank content", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<web::Json<CommentCreatedResponse>> {
    let user = session.get_user()?;
    let CreateCommentRequest {
        post_id,
        content,
        options,
    } = payload.into_inner();
    let post: PostId = parse_id(&post_id, POST_ID)?;
    state.posting.assert_exists(&post).await?;
    let comment = state
        .commenting
        .create(post, user, &content, options)
        .await?;
    let comment = single(comment, |comments| {
        comment_views(&state.authenticating, comments)
    })
    .await?;
    Ok(web::Json(CommentCreatedResponse {
        msg: "Comment successfully created!".to_owned(),
        comment,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = MessageResponse),
        (status = 400, description = "Invalid id or blank content", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "No such comment", body = Error)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[patch("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<String>,
    payload: web::Json<UpdateCommentRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let id: CommentId = parse_id(&id, COMMENT_ID)?;
    state.commenting.assert_author_is_user(&id, &user).await?;
    let UpdateCommentRequest { content, options } = payload.into_inner();
    state
        .commenting
        .update(&id, content.as_deref(), options)
        .await?;
    Ok(web::Json(MessageResponse::new("Comment successfully updated!")))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "No such comment", body = Error)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let id: CommentId = parse_id(&id, COMMENT_ID)?;
    state.commenting.assert_author_is_user(&id, &user).await?;
    state.commenting.delete(&id).await?;
    Ok(web::Json(MessageResponse::new("Comment deleted successfully!")))
}
