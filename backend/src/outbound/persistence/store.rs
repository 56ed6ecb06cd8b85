//! MongoDB client bootstrap and index management.
//!
//! The driver keeps its own connection pool per [`Client`], so the store is
//! a cheap clonable handle. Connecting pings the server once so a bad URI
//! fails at startup rather than on the first request.

use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use super::collection::DocCollection;

/// Collection holding user accounts.
pub const USERS: &str = "users";
/// Collection holding posts.
pub const POSTS: &str = "posts";
/// Collection holding comments.
pub const COMMENTS: &str = "comments";
/// Collection holding established friendships.
pub const FRIENDS: &str = "friends";
/// Collection holding friend requests.
pub const FRIEND_REQUESTS: &str = "friend_requests";
/// Collection holding calendar events.
pub const SCHEDULE: &str = "schedule";
/// Collection holding goals.
pub const GOALS: &str = "goals";

/// Errors raised while bootstrapping the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The client could not be created or the server did not answer.
    #[error("failed to connect to MongoDB: {message}")]
    Connect { message: String },

    /// An index could not be created.
    #[error("failed to create index on {collection}: {message}")]
    Index {
        collection: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    pub fn index(collection: &'static str, message: impl Into<String>) -> Self {
        Self::Index {
            collection,
            message: message.into(),
        }
    }
}

/// Connection settings for [`MongoStore`].
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::new("mongodb://localhost:27017", "focusfeed");
/// let store = MongoStore::connect(&config).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
    database: String,
}

impl StoreConfig {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Handle to the application database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect, ping the server and ensure the indexes exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] when the URI is invalid or the server
    /// is unreachable, and [`StoreError::Index`] when index creation fails.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(config.uri())
            .await
            .map_err(|err| StoreError::connect(err.to_string()))?;
        let database = client.database(config.database());
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| StoreError::connect(err.to_string()))?;
        let store = Self { database };
        store.ensure_indexes().await?;
        info!(database = config.database(), "connected to MongoDB");
        Ok(store)
    }

    /// Typed wrapper over the named collection.
    pub fn collection<T>(&self, name: &'static str) -> DocCollection<T>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync,
    {
        DocCollection::new(self.database.collection::<T>(name), name)
    }

    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique = IndexOptions::builder().unique(true).build();
        let unique_pair = IndexOptions::builder()
            .unique(true)
            .partial_filter_expression(doc! { "pair": { "$exists": true } })
            .build();
        let unique_pending_pair = IndexOptions::builder()
            .unique(true)
            .partial_filter_expression(doc! { "status": "pending", "pair": { "$exists": true } })
            .build();
        let indexes = [
            (
                USERS,
                IndexModel::builder()
                    .keys(doc! { "username": 1 })
                    .options(unique)
                    .build(),
            ),
            (
                POSTS,
                IndexModel::builder()
                    .keys(doc! { "author": 1, "dateCreated": -1 })
                    .build(),
            ),
            (
                COMMENTS,
                IndexModel::builder()
                    .keys(doc! { "post": 1, "dateCreated": 1 })
                    .build(),
            ),
            (
                FRIENDS,
                IndexModel::builder()
                    .keys(doc! { "user1": 1, "user2": 1 })
                    .build(),
            ),
            (
                FRIENDS,
                IndexModel::builder()
                    .keys(doc! { "pair": 1 })
                    .options(unique_pair)
                    .build(),
            ),
            (
                FRIEND_REQUESTS,
                IndexModel::builder()
                    .keys(doc! { "pair": 1 })
                    .options(unique_pending_pair)
                    .build(),
            ),
            (
                FRIEND_REQUESTS,
                IndexModel::builder()
                    .keys(doc! { "from": 1, "to": 1, "status": 1 })
                    .build(),
            ),
            (
                SCHEDULE,
                IndexModel::builder()
                    .keys(doc! { "user": 1, "startTime": 1 })
                    .build(),
            ),
            (
                GOALS,
                IndexModel::builder()
                    .keys(doc! { "author": 1, "dateCreated": -1 })
                    .build(),
            ),
        ];
        for (collection, model) in indexes {
            self.database
                .collection::<mongodb::bson::Document>(collection)
                .create_index(model)
                .await
                .map_err(|err| StoreError::index(collection, err.to_string()))?;
        }
        Ok(())
    }
}
