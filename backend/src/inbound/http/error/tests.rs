//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("mongodb cursor died")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"collection": "posts"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("Must be logged in!"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("Must be logged out!"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("User not found!"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn read_payload(response: HttpResponse) -> Error {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(
    #[from(internal_error_case)] internal_error: Error,
    expected_trace_id: String,
) {
    let response = ResponseError::error_response(&internal_error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header is set")
        .to_str()
        .expect("trace-id is ASCII")
        .to_owned();
    assert_eq!(header, expected_trace_id);

    let payload = read_payload(response).await;
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::conflict("User with username ada already exists!")
        .with_details(json!({"field": "username"}));

    let response = ResponseError::error_response(&error);
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    let payload = read_payload(response).await;
    assert_eq!(payload.message(), "User with username ada already exists!");
    assert_eq!(payload.details(), Some(&json!({"field": "username"})));
}

#[actix_web::test]
async fn malformed_json_becomes_invalid_request() {
    let req = TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &req);
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = read_payload(response).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "invalid body");
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[actix_web::test]
async fn bad_query_strings_carry_the_extractor_reason() {
    let req = TestRequest::default().to_http_request();
    let parse = actix_web::web::Query::<std::collections::HashMap<String, u8>>::from_query("n=x")
        .expect_err("not a number");
    let err = query_error_handler(parse, &req);

    let payload = read_payload(err.error_response()).await;
    assert_eq!(payload.message(), "invalid query");
    assert_eq!(
        payload.details().and_then(|d| d.get("code")),
        Some(&json!("invalid_query"))
    );
}
