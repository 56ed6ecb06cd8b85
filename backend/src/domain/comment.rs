//! Comments left on posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CommentId, PostId, UserId};

/// Presentation options a comment author may set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub post: PostId,
    pub author: UserId,
    pub content: String,
    pub options: Option<CommentOptions>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Partial update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPatch {
    pub content: Option<String>,
    pub options: Option<CommentOptions>,
}
