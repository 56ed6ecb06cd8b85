//! Shared MongoDB error mapping for the repository adapters.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

use crate::domain::ports::{RepositoryError, UserRepositoryError};

use super::documents::MalformedDocument;

const DUPLICATE_KEY: i32 = 11000;

/// Whether the driver reported a unique index violation.
pub(super) fn is_duplicate_key(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

fn is_connection_failure(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. }
    )
}

/// Map driver failures into query/connection constructors.
pub(super) fn map_basic_mongo_error<E, Q, C>(error: &MongoError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    debug!(error = %error, labels = ?error.labels(), "mongodb operation failed");
    if is_connection_failure(error) {
        connection("database connection error".to_owned())
    } else {
        query("database error".to_owned())
    }
}

pub(super) fn map_repository_error(error: MongoError) -> RepositoryError {
    map_basic_mongo_error(&error, RepositoryError::query, RepositoryError::connection)
}

pub(super) fn map_malformed(error: MalformedDocument) -> RepositoryError {
    RepositoryError::query(error.to_string())
}

pub(super) fn map_user_error(error: MongoError) -> UserRepositoryError {
    map_basic_mongo_error(&error, UserRepositoryError::query, UserRepositoryError::connection)
}

pub(super) fn map_user_malformed(error: MalformedDocument) -> UserRepositoryError {
    UserRepositoryError::query(error.to_string())
}
