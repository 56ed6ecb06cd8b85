//! Shared validation for free-text fields.

use serde_json::json;

use super::Error;

/// Trim `raw` and reject it when nothing is left.
pub(crate) fn required_text(field: &'static str, raw: &str) -> Result<String, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_request(format!("{field} must not be empty"))
            .with_details(json!({ "field": field, "code": "empty_field" })));
    }
    Ok(trimmed.to_owned())
}

/// Apply [`required_text`] to an optional patch value.
pub(crate) fn optional_text(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<String>, Error> {
    raw.map(|value| required_text(field, value)).transpose()
}
