//! Goal handlers. Every route acts on the signed-in user's own goals.

use actix_web::{delete, get, patch, post, web};
use serde::Deserialize;

use crate::domain::{Error, GoalId, GoalOptions};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{
    GoalCreatedResponse, GoalView, MessageResponse, goal_views, single,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const GOAL_ID: FieldName = FieldName::new("id");

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateGoalRequest {
    pub content: String,
    #[serde(default)]
    pub options: Option<GoalOptions>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateGoalRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub options: Option<GoalOptions>,
}

/// The signed-in user's goals, newest first.
#[utoipa::path(
    get,
    path = "/api/goals",
    responses(
        (status = 200, description = "Goals", body = [GoalView]),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["goals"],
    operation_id = "getGoals"
)]
#[get("/goals")]
pub async fn get_goals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<GoalView>>> {
    let user = session.get_user()?;
    let goals = state.goal_setting.get_by_author(&user).await?;
    Ok(web::Json(goal_views(&state.authenticating, goals).await?))
}

#[utoipa::path(
    post,
    path = "/api/goals",
    request_body = CreateGoalRequest,
    responses(
        (status = 200, description = "Goal created", body = GoalCreatedResponse),
        (status = 400, description = "Blank content", body = Error),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["goals"],
    operation_id = "createGoal"
)]
#[post("/goals")]
pub async fn create_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateGoalRequest>,
) -> ApiResult<web::Json<GoalCreatedResponse>> {
    let user = session.get_user()?;
    let CreateGoalRequest { content, options } = payload.into_inner();
    let goal = state.goal_setting.create(user, &content, options).await?;
    let goal = single(goal, |goals| goal_views(&state.authenticating, goals)).await?;
    Ok(web::Json(GoalCreatedResponse {
        msg: "Goal successfully created!".to_owned(),
        goal,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    request_body = UpdateGoalRequest,
    responses(
        (status = 200, description = "Goal updated", body = MessageResponse),
        (status = 400, description = "Invalid id or blank content", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "No such goal", body = Error)
    ),
    tags = ["goals"],
    operation_id = "updateGoal"
)]
#[patch("/goals/{id}")]
pub async fn update_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<String>,
    payload: web::Json<UpdateGoalRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let id: GoalId = parse_id(&id, GOAL_ID)?;
    state.goal_setting.assert_author_is_user(&id, &user).await?;
    let UpdateGoalRequest { content, options } = payload.into_inner();
    state
        .goal_setting
        .update(&id, content.as_deref(), options)
        .await?;
    Ok(web::Json(MessageResponse::new("Goal successfully updated!")))
}

#[utoipa::path(
    delete,
    path = "/api/goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    responses(
        (status = 200, description = "Goal deleted", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "No such goal", body = Error)
    ),
    tags = ["goals"],
    operation_id = "deleteGoal"
)]
#[delete("/goals/{id}")]
pub async fn delete_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let id: GoalId = parse_id(&id, GOAL_ID)?;
    state.goal_setting.assert_author_is_user(&id, &user).await?;
    state.goal_setting.delete(&id).await?;
    Ok(web::Json(MessageResponse::new("Goal deleted successfully!")))
}
