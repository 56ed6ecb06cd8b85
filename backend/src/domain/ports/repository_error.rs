//! Error type shared by the content repositories.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Failures raised by post, comment, friendship, event and goal adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "repository query failed: {message}",
    }
}

impl RepositoryError {
    /// Translate the adapter failure into a domain error for `store`.
    pub(crate) fn into_domain(self, store: &str) -> Error {
        match self {
            Self::Connection { message } => {
                Error::service_unavailable(format!("{store} repository unavailable: {message}"))
            }
            Self::Query { message } => {
                Error::internal(format!("{store} repository error: {message}"))
            }
        }
    }
}
