//! Domain entities, concept services and ports.
//!
//! Purpose: define the strongly typed documents each concept owns and the
//! services that enforce their rules. Nothing in this module knows about
//! HTTP or MongoDB; adapters reach it through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Entities: User, Post, Comment, Friendship, FriendRequest, Event, Goal.
//! - Services: one per concept (Authenticating, Posting, Commenting,
//!   Friending, Scheduling, GoalSetting).

pub mod auth;
pub mod authenticating_service;
pub mod comment;
pub mod commenting_service;
pub mod error;
pub mod event;
pub mod friending_service;
pub mod friendship;
pub mod goal;
pub mod goal_setting_service;
pub mod ids;
pub mod ports;
pub mod post;
pub mod posting_service;
pub mod scheduling_service;
pub(crate) mod text;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::auth::{Credentials, CredentialsValidationError, Password};
pub use self::authenticating_service::{
    AuthenticatingService, DELETED_USER, INCORRECT_CREDENTIALS,
};
pub use self::comment::{Comment, CommentOptions, CommentPatch};
pub use self::commenting_service::CommentingService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::event::{Event, EventKind, EventOptions, EventPatch, EventWindow, EventWindowError};
pub use self::friending_service::FriendingService;
pub use self::friendship::{FriendRequest, FriendRequestStatus, Friendship};
pub use self::goal::{Goal, GoalOptions, GoalPatch};
pub use self::goal_setting_service::GoalSettingService;
pub use self::ids::{
    CommentId, EventId, FriendRequestId, FriendshipId, GoalId, IdParseError, PostId, UserId,
};
pub use self::post::{Post, PostOptions, PostPatch};
pub use self::posting_service::PostingService;
pub use self::scheduling_service::SchedulingService;
pub use self::trace_id::TraceId;
pub use self::user::{
    PasswordDigest, USERNAME_MAX, User, UserAccount, UserValidationError, Username,
};

