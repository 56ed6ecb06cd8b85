//! Posts authored by users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PostId, UserId};

/// Presentation options a post author may set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "#f5e6ff")]
    pub background_color: Option<String>,
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub author: UserId,
    pub content: String,
    pub options: Option<PostOptions>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Partial update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub content: Option<String>,
    pub options: Option<PostOptions>,
}
