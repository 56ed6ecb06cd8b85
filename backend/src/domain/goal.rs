//! Personal goals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{GoalId, UserId};

/// Progress flags attached to a goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalOptions {
    #[serde(default)]
    pub completed: bool,
}

/// A stored goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: GoalId,
    pub author: UserId,
    pub content: String,
    pub options: Option<GoalOptions>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Partial update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalPatch {
    pub content: Option<String>,
    pub options: Option<GoalOptions>,
}
