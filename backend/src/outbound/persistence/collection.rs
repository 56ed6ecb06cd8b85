//! Typed CRUD wrapper over a MongoDB collection.
//!
//! Every concept adapter talks to MongoDB through [`DocCollection`]. It keeps
//! the driver calls in one place and logs failures with the collection name.

use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::{Collection, error::Error as MongoError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

/// Result alias for raw driver operations.
pub type MongoResult<T> = Result<T, MongoError>;

/// Typed collection handle.
#[derive(Debug)]
pub struct DocCollection<T>
where
    T: Send + Sync,
{
    inner: Collection<T>,
    name: &'static str,
}

impl<T> Clone for DocCollection<T>
where
    T: Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<T> DocCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub(crate) fn new(inner: Collection<T>, name: &'static str) -> Self {
        Self { inner, name }
    }

    fn log<R>(&self, operation: &'static str, result: MongoResult<R>) -> MongoResult<R> {
        if let Err(err) = &result {
            error!(collection = self.name, operation, error = %err, "mongodb operation failed");
        }
        result
    }

    pub async fn create_one(&self, document: &T) -> MongoResult<()> {
        let result = self.inner.insert_one(document).await.map(|_| ());
        self.log("insert_one", result)
    }

    pub async fn read_one(&self, filter: Document) -> MongoResult<Option<T>> {
        let result = self.inner.find_one(filter).await;
        self.log("find_one", result)
    }

    /// Documents matching `filter`, ordered by `sort`.
    pub async fn read_many(&self, filter: Document, sort: Document) -> MongoResult<Vec<T>> {
        let result = match self.inner.find(filter).sort(sort).await {
            Ok(cursor) => cursor.try_collect().await,
            Err(err) => Err(err),
        };
        self.log("find", result)
    }

    /// `$set` only the given fields. Returns whether a document matched.
    pub async fn partial_update_one(
        &self,
        filter: Document,
        fields: Document,
    ) -> MongoResult<bool> {
        let result = self
            .inner
            .update_one(filter, doc! { "$set": fields })
            .await
            .map(|outcome| outcome.matched_count > 0);
        self.log("update_one", result)
    }

    pub async fn replace_one(&self, filter: Document, document: &T) -> MongoResult<bool> {
        let result = self
            .inner
            .replace_one(filter, document)
            .await
            .map(|outcome| outcome.matched_count > 0);
        self.log("replace_one", result)
    }

    pub async fn delete_one(&self, filter: Document) -> MongoResult<bool> {
        let result = self
            .inner
            .delete_one(filter)
            .await
            .map(|outcome| outcome.deleted_count > 0);
        self.log("delete_one", result)
    }
}
