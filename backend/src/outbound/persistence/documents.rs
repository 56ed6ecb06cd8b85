//! BSON document shapes for each collection.
//!
//! These structs are internal to the adapter. Identifiers are stored as
//! hyphenated UUID strings and timestamps as BSON datetimes, so documents
//! stay readable in the mongo shell and sort correctly on the server.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Comment, CommentId, CommentOptions, Event, EventId, EventOptions, EventWindow, FriendRequest,
    FriendRequestId, FriendRequestStatus, Friendship, FriendshipId, Goal, GoalId, GoalOptions,
    PasswordDigest, Post, PostId, PostOptions, User, UserAccount, UserId, Username,
};

/// Raised when a stored document no longer satisfies domain invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed {collection} document {id}: {reason}")]
pub struct MalformedDocument {
    collection: &'static str,
    id: String,
    reason: String,
}

impl MalformedDocument {
    fn new(collection: &'static str, id: &str, reason: impl ToString) -> Self {
        Self {
            collection,
            id: id.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Order-independent key for two users. Unique indexes on it keep one
/// friendship and one pending request per pair.
pub(super) fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}:{b}")
    } else {
        format!("{b}:{a}")
    }
}

macro_rules! parse_id {
    ($ty:ty, $raw:expr, $collection:literal, $doc_id:expr) => {
        <$ty>::parse($raw).map_err(|err| MalformedDocument::new($collection, $doc_id, err))?
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub password_hash: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_updated: DateTime<Utc>,
}

impl From<&UserAccount> for UserDocument {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.user.id.to_string(),
            username: account.user.username.to_string(),
            password_hash: account.password.as_phc().to_owned(),
            date_created: account.date_created,
            date_updated: account.date_updated,
        }
    }
}

impl TryFrom<UserDocument> for UserAccount {
    type Error = MalformedDocument;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        let id = parse_id!(UserId, &doc.id, "users", &doc.id);
        let username = Username::new(&doc.username)
            .map_err(|err| MalformedDocument::new("users", &doc.id, err))?;
        Ok(Self {
            user: User { id, username },
            password: PasswordDigest::from_phc(doc.password_hash),
            date_created: doc.date_created,
            date_updated: doc.date_updated,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PostOptions>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_updated: DateTime<Utc>,
}

impl From<&Post> for PostDocument {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            author: post.author.to_string(),
            content: post.content.clone(),
            options: post.options.clone(),
            date_created: post.date_created,
            date_updated: post.date_updated,
        }
    }
}

impl TryFrom<PostDocument> for Post {
    type Error = MalformedDocument;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id!(PostId, &doc.id, "posts", &doc.id),
            author: parse_id!(UserId, &doc.author, "posts", &doc.id),
            content: doc.content,
            options: doc.options,
            date_created: doc.date_created,
            date_updated: doc.date_updated,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub post: String,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<CommentOptions>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_updated: DateTime<Utc>,
}

impl From<&Comment> for CommentDocument {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post: comment.post.to_string(),
            author: comment.author.to_string(),
            content: comment.content.clone(),
            options: comment.options.clone(),
            date_created: comment.date_created,
            date_updated: comment.date_updated,
        }
    }
}

impl TryFrom<CommentDocument> for Comment {
    type Error = MalformedDocument;

    fn try_from(doc: CommentDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id!(CommentId, &doc.id, "comments", &doc.id),
            post: parse_id!(PostId, &doc.post, "comments", &doc.id),
            author: parse_id!(UserId, &doc.author, "comments", &doc.id),
            content: doc.content,
            options: doc.options,
            date_created: doc.date_created,
            date_updated: doc.date_updated,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub user1: String,
    pub user2: String,
    #[serde(default)]
    pub pair: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_updated: DateTime<Utc>,
}

impl From<&Friendship> for FriendshipDocument {
    fn from(friendship: &Friendship) -> Self {
        Self {
            id: friendship.id.to_string(),
            user1: friendship.user1.to_string(),
            user2: friendship.user2.to_string(),
            pair: pair_key(&friendship.user1.to_string(), &friendship.user2.to_string()),
            date_created: friendship.date_created,
            date_updated: friendship.date_updated,
        }
    }
}

impl TryFrom<FriendshipDocument> for Friendship {
    type Error = MalformedDocument;

    fn try_from(doc: FriendshipDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id!(FriendshipId, &doc.id, "friends", &doc.id),
            user1: parse_id!(UserId, &doc.user1, "friends", &doc.id),
            user2: parse_id!(UserId, &doc.user2, "friends", &doc.id),
            date_created: doc.date_created,
            date_updated: doc.date_updated,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub pair: String,
    pub status: FriendRequestStatus,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_updated: DateTime<Utc>,
}

impl From<&FriendRequest> for FriendRequestDocument {
    fn from(request: &FriendRequest) -> Self {
        Self {
            id: request.id.to_string(),
            from: request.from.to_string(),
            to: request.to.to_string(),
            pair: pair_key(&request.from.to_string(), &request.to.to_string()),
            status: request.status,
            date_created: request.date_created,
            date_updated: request.date_updated,
        }
    }
}

impl TryFrom<FriendRequestDocument> for FriendRequest {
    type Error = MalformedDocument;

    fn try_from(doc: FriendRequestDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id!(FriendRequestId, &doc.id, "friend_requests", &doc.id),
            from: parse_id!(UserId, &doc.from, "friend_requests", &doc.id),
            to: parse_id!(UserId, &doc.to, "friend_requests", &doc.id),
            status: doc.status,
            date_created: doc.date_created,
            date_updated: doc.date_updated,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub name: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub options: EventOptions,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_updated: DateTime<Utc>,
}

impl From<&Event> for EventDocument {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            user: event.user.to_string(),
            name: event.name.clone(),
            start_time: event.window.start(),
            end_time: event.window.end(),
            options: event.options,
            date_created: event.date_created,
            date_updated: event.date_updated,
        }
    }
}

impl TryFrom<EventDocument> for Event {
    type Error = MalformedDocument;

    fn try_from(doc: EventDocument) -> Result<Self, Self::Error> {
        let window = EventWindow::new(doc.start_time, doc.end_time)
            .map_err(|err| MalformedDocument::new("schedule", &doc.id, err))?;
        Ok(Self {
            id: parse_id!(EventId, &doc.id, "schedule", &doc.id),
            user: parse_id!(UserId, &doc.user, "schedule", &doc.id),
            name: doc.name,
            window,
            options: doc.options,
            date_created: doc.date_created,
            date_updated: doc.date_updated,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GoalOptions>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_updated: DateTime<Utc>,
}

impl From<&Goal> for GoalDocument {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.to_string(),
            author: goal.author.to_string(),
            content: goal.content.clone(),
            options: goal.options.clone(),
            date_created: goal.date_created,
            date_updated: goal.date_updated,
        }
    }
}

impl TryFrom<GoalDocument> for Goal {
    type Error = MalformedDocument;

    fn try_from(doc: GoalDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id!(GoalId, &doc.id, "goals", &doc.id),
            author: parse_id!(UserId, &doc.author, "goals", &doc.id),
            content: doc.content,
            options: doc.options,
            date_created: doc.date_created,
            date_updated: doc.date_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 18, 9, 30, 0)
            .single()
            .expect("timestamp")
    }

    #[test]
    fn user_document_uses_mongo_field_names() {
        let account = UserAccount {
            user: User {
                id: UserId::generate(),
                username: Username::new("ada").expect("username"),
            },
            password: PasswordDigest::from_phc("$argon2id$v=19$stub".to_owned()),
            date_created: at(),
            date_updated: at(),
        };
        let doc = bson::to_document(&UserDocument::from(&account)).expect("serialise");
        assert_eq!(doc.get_str("_id").expect("_id"), account.user.id.to_string());
        assert_eq!(doc.get_str("passwordHash").expect("hash"), "$argon2id$v=19$stub");
        assert!(doc.get_datetime("dateCreated").is_ok());
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn malformed_ids_are_reported(#[case] author: &str) {
        let doc = PostDocument {
            id: PostId::generate().to_string(),
            author: author.to_owned(),
            content: "hello".to_owned(),
            options: None,
            date_created: at(),
            date_updated: at(),
        };
        let err = Post::try_from(doc).expect_err("malformed");
        assert!(err.to_string().starts_with("malformed posts document"));
    }

    #[test]
    fn event_document_keeps_type_option() {
        let event = Event {
            id: EventId::generate(),
            user: UserId::generate(),
            name: "focus block".to_owned(),
            window: EventWindow::new(at(), at()).expect("window"),
            options: EventOptions {
                kind: Some(crate::domain::EventKind::Focus),
            },
            date_created: at(),
            date_updated: at(),
        };
        let doc = bson::to_document(&EventDocument::from(&event)).expect("serialise");
        let options = doc.get_document("options").expect("options");
        assert_eq!(options.get_str("type").expect("type"), "focus");
    }

    #[test]
    fn friend_request_status_round_trips_as_lowercase() {
        let request = FriendRequest {
            id: FriendRequestId::generate(),
            from: UserId::generate(),
            to: UserId::generate(),
            status: FriendRequestStatus::Rejected,
            date_created: at(),
            date_updated: at(),
        };
        let doc = bson::to_document(&FriendRequestDocument::from(&request)).expect("serialise");
        assert_eq!(doc.get_str("status").expect("status"), "rejected");
    }

    #[test]
    fn pair_key_ignores_direction() {
        let (ada, bob) = (UserId::generate(), UserId::generate());
        let forward = FriendshipDocument::from(&Friendship {
            id: FriendshipId::generate(),
            user1: ada,
            user2: bob,
            date_created: at(),
            date_updated: at(),
        });
        let backward = FriendRequestDocument::from(&FriendRequest {
            id: FriendRequestId::generate(),
            from: bob,
            to: ada,
            status: FriendRequestStatus::Pending,
            date_created: at(),
            date_updated: at(),
        });
        assert_eq!(forward.pair, backward.pair);
    }
}
