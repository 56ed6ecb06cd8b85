//! `$set` documents for partial updates.
//!
//! Only fields present in a patch are written, so concurrent edits to other
//! fields survive.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, Document, doc};
use serde::Serialize;

use crate::domain::ports::RepositoryError;
use crate::domain::{CommentPatch, GoalPatch, PostPatch};

fn stamped(at: DateTime<Utc>) -> Document {
    doc! { "dateUpdated": bson::DateTime::from_chrono(at) }
}

fn set_options<T: Serialize>(
    fields: &mut Document,
    options: Option<&T>,
) -> Result<(), RepositoryError> {
    if let Some(options) = options {
        let value = bson::to_bson(options)
            .map_err(|err| RepositoryError::query(format!("failed to encode options: {err}")))?;
        fields.insert("options", value);
    }
    Ok(())
}

fn content_patch<T: Serialize>(
    content: Option<&String>,
    options: Option<&T>,
    at: DateTime<Utc>,
) -> Result<Document, RepositoryError> {
    let mut fields = stamped(at);
    if let Some(content) = content {
        fields.insert("content", content.as_str());
    }
    set_options(&mut fields, options)?;
    Ok(fields)
}

pub(super) fn post_patch(
    patch: &PostPatch,
    at: DateTime<Utc>,
) -> Result<Document, RepositoryError> {
    content_patch(patch.content.as_ref(), patch.options.as_ref(), at)
}

pub(super) fn comment_patch(
    patch: &CommentPatch,
    at: DateTime<Utc>,
) -> Result<Document, RepositoryError> {
    content_patch(patch.content.as_ref(), patch.options.as_ref(), at)
}

pub(super) fn goal_patch(
    patch: &GoalPatch,
    at: DateTime<Utc>,
) -> Result<Document, RepositoryError> {
    content_patch(patch.content.as_ref(), patch.options.as_ref(), at)
}
