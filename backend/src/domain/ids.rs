//! Document identifiers.
//!
//! Every collection keys its documents by a UUID v7, so ids minted later
//! sort after earlier ones and break ties between equal timestamps. Each
//! concept gets its own newtype so a post id can never be passed where a
//! goal id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Raised when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} id must be a valid UUID")]
pub struct IdParseError {
    kind: &'static str,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh time-ordered identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parse an identifier from its hyphenated string form.
            pub fn parse(raw: &str) -> Result<Self, IdParseError> {
                Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| IdParseError { kind: $kind })
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId => "user"
);
define_id!(
    /// Identifier of a post.
    PostId => "post"
);
define_id!(
    /// Identifier of a comment.
    CommentId => "comment"
);
define_id!(
    /// Identifier of a friendship.
    FriendshipId => "friendship"
);
define_id!(
    /// Identifier of a friend request.
    FriendRequestId => "friend request"
);
define_id!(
    /// Identifier of a calendar event.
    EventId => "event"
);
define_id!(
    /// Identifier of a goal.
    GoalId => "goal"
);
