//! Account and session handlers.
//!
//! ```text
//! POST /api/users {"username":"ada","password":"hunter2"}
//! POST /api/login {"username":"ada","password":"hunter2"}
//! GET /api/session
//! ```

use actix_web::{delete, get, patch, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domain::{
    Credentials, CredentialsValidationError, Error, INCORRECT_CREDENTIALS, User,
    UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{MessageResponse, UserCreatedResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Username and password, used for both registration and login.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "hunter2")]
    pub password: String,
}

impl TryFrom<&CredentialsRequest> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: &CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsernameRequest {
    #[schema(example = "ada_l")]
    pub username: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let (field, code) = match &err {
        CredentialsValidationError::Username(_) => ("username", "invalid_username"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_field"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// The signed-in user.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Account no longer exists", body = Error)
    ),
    tags = ["users"],
    operation_id = "getSessionUser"
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user = session.get_user()?;
    let user = state.authenticating.get_user_by_id(&user).await?;
    Ok(web::Json(user))
}

/// Every registered user, ordered by username.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.authenticating.get_users().await?))
}

/// Look a user up by username.
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Username, at least one character")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid username", body = Error),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{username}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    username: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .authenticating
        .get_user_by_username(&username.into_inner())
        .await?;
    Ok(web::Json(user))
}

/// Register a new account. The caller must be logged out.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User created", body = UserCreatedResponse),
        (status = 400, description = "Invalid credentials", body = Error),
        (status = 403, description = "Already logged in", body = Error),
        (status = 409, description = "Username taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<UserCreatedResponse>> {
    session.is_logged_out()?;
    let credentials = Credentials::try_from(&*payload).map_err(map_credentials_error)?;
    let user = state.authenticating.create(&credentials).await?;
    Ok(web::Json(UserCreatedResponse {
        msg: "User created successfully!".to_owned(),
        user,
    }))
}

/// Rename the signed-in user.
#[utoipa::path(
    patch,
    path = "/api/users/username",
    request_body = UpdateUsernameRequest,
    responses(
        (status = 200, description = "Renamed", body = MessageResponse),
        (status = 400, description = "Invalid username", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 409, description = "Username taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUsername"
)]
#[patch("/users/username")]
pub async fn update_username(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateUsernameRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    state
        .authenticating
        .update_username(&user, &payload.username)
        .await?;
    Ok(web::Json(MessageResponse::new("Updated username successfully!")))
}

/// Change the signed-in user's password.
#[utoipa::path(
    patch,
    path = "/api/users/password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Empty new password", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Current password is wrong", body = Error)
    ),
    tags = ["users"],
    operation_id = "updatePassword"
)]
#[patch("/users/password")]
pub async fn update_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdatePasswordRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    state
        .authenticating
        .update_password(&user, &payload.current_password, &payload.new_password)
        .await?;
    Ok(web::Json(MessageResponse::new("Updated password successfully!")))
}

/// End the session and delete the signed-in account.
#[utoipa::path(
    delete,
    path = "/api/users",
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    session.end()?;
    state.authenticating.delete(&user).await?;
    Ok(web::Json(MessageResponse::new("User deleted!")))
}

/// Authenticate and start a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Logged in", body = MessageResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Already logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    session.is_logged_out()?;
    // A malformed username cannot belong to any account.
    let credentials = Credentials::try_from(&*payload).map_err(|err| match err {
        CredentialsValidationError::Username(ref inner)
            if *inner != UserValidationError::EmptyUsername =>
        {
            Error::unauthorized(INCORRECT_CREDENTIALS)
        }
        other => map_credentials_error(other),
    })?;
    let user = state.authenticating.authenticate(&credentials).await?;
    session.start(&user)?;
    info!(user_id = %user.id, "session started");
    Ok(web::Json(MessageResponse::new("Logged in!")))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<web::Json<MessageResponse>> {
    session.end()?;
    Ok(web::Json(MessageResponse::new("Logged out!")))
}
