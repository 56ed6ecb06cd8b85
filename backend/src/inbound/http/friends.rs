//! Friend and friend-request handlers.
//!
//! Path segments name the other user by username; the handlers resolve them
//! through Authenticating before calling Friending.

use actix_web::{delete, get, post, put, web};

use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{FriendRequestView, MessageResponse, friend_request_views};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

async fn resolve(state: &HttpState, username: &str) -> Result<UserId, Error> {
    Ok(state
        .authenticating
        .get_user_by_username(username)
        .await?
        .id)
}

/// Usernames of the signed-in user's friends.
#[utoipa::path(
    get,
    path = "/api/friends",
    responses(
        (status = 200, description = "Friend usernames", body = [String]),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["friends"],
    operation_id = "getFriends"
)]
#[get("/friends")]
pub async fn get_friends(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<String>>> {
    let user = session.get_user()?;
    let friends = state.friending.get_friends(&user).await?;
    Ok(web::Json(
        state.authenticating.ids_to_usernames(&friends).await?,
    ))
}

/// End a friendship.
#[utoipa::path(
    delete,
    path = "/api/friends/{friend}",
    params(("friend" = String, Path, description = "Friend's username")),
    responses(
        (status = 200, description = "Unfriended", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No such user or friendship", body = Error)
    ),
    tags = ["friends"],
    operation_id = "removeFriend"
)]
#[delete("/friends/{friend}")]
pub async fn remove_friend(
    state: web::Data<HttpState>,
    session: SessionContext,
    friend: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let friend = resolve(&state, &friend).await?;
    state.friending.remove_friend(&user, &friend).await?;
    Ok(web::Json(MessageResponse::new("Unfriended!")))
}

/// Requests sent or received by the signed-in user.
#[utoipa::path(
    get,
    path = "/api/friend/requests",
    responses(
        (status = 200, description = "Friend requests", body = [FriendRequestView]),
        (status = 401, description = "Not logged in", body = Error)
    ),
    tags = ["friends"],
    operation_id = "getFriendRequests"
)]
#[get("/friend/requests")]
pub async fn get_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FriendRequestView>>> {
    let user = session.get_user()?;
    let requests = state.friending.get_requests(&user).await?;
    Ok(web::Json(
        friend_request_views(&state.authenticating, requests).await?,
    ))
}

/// Send a friend request.
#[utoipa::path(
    post,
    path = "/api/friend/requests/{to}",
    params(("to" = String, Path, description = "Recipient's username")),
    responses(
        (status = 200, description = "Request sent", body = MessageResponse),
        (status = 400, description = "Request to self", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 409, description = "Already friends or request pending", body = Error)
    ),
    tags = ["friends"],
    operation_id = "sendFriendRequest"
)]
#[post("/friend/requests/{to}")]
pub async fn send_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    to: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let to = resolve(&state, &to).await?;
    state.friending.send_request(user, to).await?;
    Ok(web::Json(MessageResponse::new("Sent request!")))
}

/// Withdraw a pending request the signed-in user sent.
#[utoipa::path(
    delete,
    path = "/api/friend/requests/{to}",
    params(("to" = String, Path, description = "Recipient's username")),
    responses(
        (status = 200, description = "Request removed", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No such user or request", body = Error)
    ),
    tags = ["friends"],
    operation_id = "removeFriendRequest"
)]
#[delete("/friend/requests/{to}")]
pub async fn remove_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    to: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let to = resolve(&state, &to).await?;
    state.friending.remove_request(&user, &to).await?;
    Ok(web::Json(MessageResponse::new("Removed request!")))
}

/// Accept a pending request sent to the signed-in user.
#[utoipa::path(
    put,
    path = "/api/friend/accept/{from}",
    params(("from" = String, Path, description = "Sender's username")),
    responses(
        (status = 200, description = "Request accepted", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No such user or request", body = Error)
    ),
    tags = ["friends"],
    operation_id = "acceptFriendRequest"
)]
#[put("/friend/accept/{from}")]
pub async fn accept_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    from: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let from = resolve(&state, &from).await?;
    state.friending.accept_request(&from, &user).await?;
    Ok(web::Json(MessageResponse::new("Accepted request!")))
}

/// Reject a pending request sent to the signed-in user.
#[utoipa::path(
    put,
    path = "/api/friend/reject/{from}",
    params(("from" = String, Path, description = "Sender's username")),
    responses(
        (status = 200, description = "Request rejected", body = MessageResponse),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No such user or request", body = Error)
    ),
    tags = ["friends"],
    operation_id = "rejectFriendRequest"
)]
#[put("/friend/reject/{from}")]
pub async fn reject_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    from: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user = session.get_user()?;
    let from = resolve(&state, &from).await?;
    state.friending.reject_request(&from, &user).await?;
    Ok(web::Json(MessageResponse::new("Rejected request!")))
}

#[cfg(test)]
mod tests {
    use crate::inbound::http::test_utils::{memory_state, sign_up_and_login, test_app};
    use actix_web::http::{Method, StatusCode};
    use actix_web::test as actix_test;
    use serde_json::Value;

    use crate::domain::UserId;

    #[actix_web::test]
    async fn request_accept_and_unfriend() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let ada = sign_up_and_login(&app, "ada").await;
        let grace = sign_up_and_login(&app, "grace").await;

        let call =
            |method: Method, uri: &'static str, cookie: &actix_web::cookie::Cookie<'static>| {
                actix_test::TestRequest::default()
                    .method(method)
                    .uri(uri)
                    .cookie(cookie.clone())
                    .to_request()
            };

        let sent = actix_test::call_service(
            &app,
            call(Method::POST, "/api/friend/requests/grace", &ada),
        )
        .await;
        assert_eq!(sent.status(), StatusCode::OK);

        let pending = actix_test::call_service(
            &app,
            call(Method::GET, "/api/friend/requests", &grace),
        )
        .await;
        let body: Value = actix_test::read_body_json(pending).await;
        assert_eq!(body[0]["from"], "ada");
        assert_eq!(body[0]["to"], "grace");
        assert_eq!(body[0]["status"], "pending");

        let accepted = actix_test::call_service(
            &app,
            call(Method::PUT, "/api/friend/accept/ada", &grace),
        )
        .await;
        assert_eq!(accepted.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(accepted).await;
        assert_eq!(body["msg"], "Accepted request!");

        let friends = actix_test::call_service(&app, call(Method::GET, "/api/friends", &ada)).await;
        let body: Value = actix_test::read_body_json(friends).await;
        assert_eq!(body, serde_json::json!(["grace"]));

        let again = actix_test::call_service(
            &app,
            call(Method::POST, "/api/friend/requests/ada", &grace),
        )
        .await;
        assert_eq!(again.status(), StatusCode::CONFLICT);

        let unfriended = actix_test::call_service(
            &app,
            call(Method::DELETE, "/api/friends/ada", &grace),
        )
        .await;
        assert_eq!(unfriended.status(), StatusCode::OK);

        let gone = actix_test::call_service(
            &app,
            call(Method::DELETE, "/api/friends/ada", &grace),
        )
        .await;
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn requests_to_unknown_users_are_not_found() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let ada = sign_up_and_login(&app, "ada").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/friend/requests/nobody")
                .cookie(ada)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], "User with username nobody does not exist!");
    }

    #[actix_web::test]
    async fn requests_to_self_are_rejected() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let ada = sign_up_and_login(&app, "ada").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/friend/requests/ada")
                .cookie(ada)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn a_request_is_accepted_only_once() {
        let state = memory_state();
        let app = actix_test::init_service(test_app(state.clone())).await;
        let ada = sign_up_and_login(&app, "ada").await;
        let grace = sign_up_and_login(&app, "grace").await;
        let accept = || {
            actix_test::TestRequest::put()
                .uri("/api/friend/accept/ada")
                .cookie(grace.clone())
                .to_request()
        };

        let sent = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/friend/requests/grace")
                .cookie(ada.clone())
                .to_request(),
        )
        .await;
        assert_eq!(sent.status(), StatusCode::OK);

        let first = actix_test::call_service(&app, accept()).await;
        let second = actix_test::call_service(&app, accept()).await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::NOT_FOUND);

        let unfriended = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/friends/grace")
                .cookie(ada.clone())
                .to_request(),
        )
        .await;
        assert_eq!(unfriended.status(), StatusCode::OK);

        let friends = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/friends")
                .cookie(ada)
                .to_request(),
        )
        .await;
        let body: Value = actix_test::read_body_json(friends).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn overlapping_accept_and_reject_resolve_once() {
        let state = memory_state();
        let (ada, grace) = (UserId::generate(), UserId::generate());
        state
            .friending
            .send_request(ada, grace)
            .await
            .expect("request sent");

        let (accepted, rejected) = futures_util::future::join(
            state.friending.accept_request(&ada, &grace),
            state.friending.reject_request(&ada, &grace),
        )
        .await;

        assert!(accepted.is_ok() != rejected.is_ok());
        let friends = state.friending.get_friends(&ada).await.expect("friends");
        assert_eq!(friends.len(), usize::from(accepted.is_ok()));
    }

    #[actix_web::test]
    async fn crossing_requests_leave_one_pending() {
        let state = memory_state();
        let (ada, grace) = (UserId::generate(), UserId::generate());

        let (forward, backward) = futures_util::future::join(
            state.friending.send_request(ada, grace),
            state.friending.send_request(grace, ada),
        )
        .await;

        assert!(forward.is_ok() != backward.is_ok());
        let requests = state.friending.get_requests(&ada).await.expect("requests");
        assert_eq!(requests.len(), 1);
    }
}
