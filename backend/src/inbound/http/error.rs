//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. Extractor failures (malformed JSON, bad query strings) are routed
//! through the same payload so clients only ever see one error shape.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        if self.code() != ErrorCode::InternalError {
            return builder.json(self);
        }

        // Internal messages stay in the log; clients get a generic payload.
        error!(message = self.message(), trace_id = ?self.trace_id(), "internal error");
        let public = Error::internal("Internal server error");
        match self.trace_id() {
            Some(id) => builder.json(public.with_trace_id(id.to_owned())),
            None => builder.json(public),
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced as internal error");
        Self::internal("Internal server error")
    }
}

fn extractor_error(source: &'static str, detail: String) -> Error {
    debug!(source, detail = %detail, "request extraction failed");
    Error::invalid_request(format!("invalid {source}"))
        .with_details(json!({ "code": format!("invalid_{source}"), "reason": detail }))
}

/// `JsonConfig` error handler producing the standard error payload.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error("body", err.to_string()).into()
}

/// `QueryConfig` error handler producing the standard error payload.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error("query", err.to_string()).into()
}

/// `PathConfig` error handler producing the standard error payload.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    extractor_error("path", err.to_string()).into()
}

#[cfg(test)]
mod tests;
