//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Wire name of a request field, as the client sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: Option<&str>) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let Some(value) = value {
        details["value"] = json!(value);
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        format!("missing required field: {}", field.as_str()),
        ErrorCode::MissingField,
        None,
    )
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    field_error(
        field,
        format!("{} must be a valid UUID", field.as_str()),
        ErrorCode::InvalidUuid,
        Some(value),
    )
}

/// Parse one of the domain id newtypes from a path or body string.
pub(crate) fn parse_id<T: FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    value.parse().map_err(|_| invalid_uuid_error(field, value))
}

/// Reject an absent value with a `missing_field` error.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    field_error(
        field,
        format!("{} must be an RFC 3339 timestamp", field.as_str()),
        ErrorCode::InvalidTimestamp,
        Some(value),
    )
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, value))
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, PostId};
    use chrono::TimeZone;
    use rstest::rstest;

    const POST_ID: FieldName = FieldName::new("id");
    const START: FieldName = FieldName::new("startTime");

    #[rstest]
    fn parse_id_accepts_hyphenated_uuids() {
        let id: PostId =
            parse_id("3fa85f64-5717-4562-b3fc-2c963f66afa6", POST_ID).expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    fn parse_id_reports_field_and_value() {
        let err = parse_id::<PostId>("not-a-uuid", POST_ID).expect_err("invalid id");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(err.message(), "id must be a valid UUID");
        let details = err.details().expect("details");
        assert_eq!(details["code"], "invalid_uuid");
        assert_eq!(details["value"], "not-a-uuid");
    }

    #[rstest]
    #[case("2024-10-18T09:30:00Z", 9)]
    #[case("2024-10-18T11:30:00+02:00", 9)]
    fn timestamps_normalise_to_utc(#[case] raw: &str, #[case] hour: u32) {
        let parsed = parse_rfc3339_timestamp(raw, START).expect("valid timestamp");
        let expected = Utc
            .with_ymd_and_hms(2024, 10, 18, hour, 30, 0)
            .single()
            .expect("fixture timestamp");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2024-10-18")]
    fn malformed_timestamps_are_rejected(#[case] raw: &str) {
        let err = parse_rfc3339_timestamp(raw, START).expect_err("malformed");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "startTime");
        assert_eq!(details["code"], "invalid_timestamp");
    }

    #[rstest]
    fn optional_timestamp_passes_through_none() {
        assert_eq!(parse_optional_rfc3339_timestamp(None, START).expect("none"), None);
    }

    #[rstest]
    fn require_reports_missing_field() {
        let err = require::<&str>(None, FieldName::new("author")).expect_err("missing");
        assert_eq!(err.message(), "missing required field: author");
        assert_eq!(err.details().expect("details")["code"], "missing_field");
    }
}
