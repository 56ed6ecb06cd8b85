//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::{Password, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Failures raised by hashing adapters.
    pub enum CredentialHasherError {
        /// The adapter could not produce a digest.
        Hash { message } => "password hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedDigest { message } => "stored password digest is malformed: {message}",
    }
}

/// Hashes and verifies passwords. Digests are self-describing strings that
/// carry their own salt and parameters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Derive a salted digest for `password`.
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialHasherError>;

    /// Check `password` against `digest`. A mismatch is `Ok(false)`.
    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialHasherError>;
}
