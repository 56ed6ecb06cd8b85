//! Post handlers.
//!
//! ```text
//! GET /api/posts?author=ada
//! POST /api/posts {"content":"Hello","options":{"backgroundColor":"#fff"}}
//! PATCH /api/posts/{id} {"content":"Edited"}
//! DELETE /api/posts/{id}
//! ```

use actix_web::{delete, get, patch, post, web};
use serde::Deserialize;

use crate::domain::{Error, PostId, PostOptions};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{
    MessageResponse, PostCreatedResponse, PostView, post_views, single,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const POST_ID: FieldName = FieldName::new("id");

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostsQuery {
    /// Only posts by this username.
    pub author: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub options: Option<PostOptions>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub options: Option<PostOptions>,
}

/// Posts, newest first, optionally filtered by author.
#[utoipa::path(
    get,
    path = "/api/posts",
    params(PostsQuery),
    responses(
        (status = 200, description = "Posts", body = [PostView]),
        (status = 404, description = "Unknown author", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPosts",
    security([])
)]
#[get("/posts")]
pub async fn get_posts(
    state: web::Data<HttpState>,
    query: web::Query<PostsQuery>,
) -> ApiResult<web::Json<Vec<PostView>>> {
    let posts = match query.author.as_deref().filter(|author| !author.is_empty()) {
        Some(author) => {
            let author = state.authenticating.get_user_by_username(author).await?;
            state.posting.get_by_author(&author.id).await?
        }
        None => state.posting.get_posts().await?,
    };
    Ok(web::Json(post_views(&state.authenticating, posts).await?))
}

/// Publish a post as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Post created", body = PostCreatedResponse),
        (status = 400, description = "Blank content", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<web::Json<PostCreatedResponse>> {
    let user = session.get_user()?;
    let CreatePostRequest { content, options } = payload.into_inner();
    let post = state.posting.create(user, &content, options).await?;
    let post = single(post, |posts| post_views(&state.authenticating, posts)).await?;
    Ok(web::Json(PostCreatedResponse {
        msg: "Post successfully created!".to_owned(),
        post,
    }))
}

/// Edit one of the signed-in user's posts.
#[utoipa::path(
    patch,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = MessageResponse),
        (status = 400, description = "Invalid id or blank content", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[patch("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let id: PostId = parse_id(&id, POST_ID)?;
    state.posting.assert_author_is_user(&id, &user).await?;
    let UpdatePostRequest { content, options } = payload.into_inner();
    state
        .posting
        .update(&id, content.as_deref(), options)
        .await?;
    Ok(web::Json(MessageResponse::new("Post successfully updated!")))
}

/// Delete one of the signed-in user's posts.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let id: PostId = parse_id(&id, POST_ID)?;
    state.posting.assert_author_is_user(&id, &user).await?;
    state.posting.delete(&id).await?;
    Ok(web::Json(MessageResponse::new("Post deleted successfully!")))
}
