//! In-process application harness shared by the integration suites.

use std::future::Future;
use std::rc::Rc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;
use focusfeed::inbound::http::test_utils::{memory_state, session_cookie, test_app};
use futures_util::future::LocalBoxFuture;
use serde_json::{Value, json};

type CallFn = dyn Fn(actix_http::Request) -> LocalBoxFuture<'static, ServiceResponse>;

/// Status and JSON body of a completed request.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

/// The `/api` surface over fresh in-memory storage, driven on its own
/// single-threaded actix runtime.
pub struct TestApp {
    runtime: actix_rt::Runtime,
    call: Rc<CallFn>,
}

fn erase<S>(service: S) -> Rc<CallFn>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
        + 'static,
{
    let service = Rc::new(service);
    Rc::new(move |req| {
        let service = Rc::clone(&service);
        Box::pin(async move { actix_test::call_service(&*service, req).await })
    })
}

impl TestApp {
    pub fn new() -> Self {
        let runtime = actix_rt::Runtime::new().expect("actix runtime");
        let call = runtime.block_on(async {
            erase(actix_test::init_service(test_app(memory_state())).await)
        });
        Self { runtime, call }
    }

    /// Run `fut` to completion on the harness runtime.
    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }

    /// Send `req` and capture the reply, plus any session cookie it set.
    pub fn send(&self, req: actix_test::TestRequest) -> (Reply, Option<Cookie<'static>>) {
        let call = Rc::clone(&self.call);
        self.block_on(async move {
            let res = call(req.to_request()).await;
            let status = res.status().as_u16();
            let cookie = session_cookie(&res);
            let bytes = actix_test::read_body(res).await;
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (Reply { status, body }, cookie)
        })
    }

    /// Register `username` with password `"secret"` and log in.
    pub fn sign_up_and_login(&self, username: &str) -> Cookie<'static> {
        let credentials = json!({ "username": username, "password": "secret" });
        let (created, _) = self.send(
            actix_test::TestRequest::post()
                .uri("/api/users")
                .set_json(&credentials),
        );
        assert_eq!(created.status, 200, "sign up {username}: {}", created.body);
        let (logged_in, cookie) = self.send(
            actix_test::TestRequest::post()
                .uri("/api/login")
                .set_json(&credentials),
        );
        assert_eq!(logged_in.status, 200, "log in {username}: {}", logged_in.body);
        cookie.expect("session cookie")
    }
}
