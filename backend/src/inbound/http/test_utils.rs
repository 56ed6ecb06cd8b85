//! Test helpers for inbound HTTP components.
//!
//! Compiled for unit tests and, behind the `test-support` feature, for the
//! integration suites under `tests/`.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use super::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use super::state::HttpState;
use crate::composition::memory_ports;

/// Session middleware with a fresh key and the `Secure` flag off so cookies
/// round-trip over plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
    .middleware()
}

/// Handler state over empty in-memory adapters.
pub fn memory_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        memory_ports(),
        Arc::new(DefaultClock),
    ))
}

/// The full `/api` surface behind a test session middleware.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(test_session_middleware())
        .configure(super::configure)
}

/// The session cookie set on `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Register `username` with password `"secret"`, log in and return the
/// session cookie.
#[cfg(test)]
pub(crate) async fn sign_up_and_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
) -> Cookie<'static> {
    use actix_web::test;
    use serde_json::json;

    let credentials = json!({ "username": username, "password": "secret" });
    let created = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert!(created.status().is_success(), "sign up {username}");

    let logged_in = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert!(logged_in.status().is_success(), "log in {username}");
    session_cookie(&logged_in).expect("session cookie")
}
