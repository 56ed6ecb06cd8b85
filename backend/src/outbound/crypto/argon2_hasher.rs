//! Argon2id implementation of the `CredentialHasher` port.
//!
//! Hashing is CPU bound, so both operations run on the blocking pool to keep
//! actix workers responsive. Digests use the PHC string format and carry
//! their own salt and parameters, so stored hashes survive parameter
//! changes.

use argon2::Argon2;
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use async_trait::async_trait;
use rand::rngs::OsRng;
use tokio::task;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialHasher, CredentialHasherError};
use crate::domain::{Password, PasswordDigest};

/// Argon2id with the crate's default cost parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(secret: &[u8]) -> Result<String, CredentialHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret, &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CredentialHasherError::hash(err.to_string()))
}

fn verify_blocking(secret: &[u8], encoded: &str) -> Result<bool, CredentialHasherError> {
    let parsed = PasswordHash::new(encoded)
        .map_err(|err| CredentialHasherError::malformed_digest(err.to_string()))?;
    match Argon2::default().verify_password(secret, &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(err) => Err(CredentialHasherError::hash(err.to_string())),
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialHasherError> {
        let secret = Zeroizing::new(password.expose().as_bytes().to_vec());
        let encoded = task::spawn_blocking(move || hash_blocking(&secret))
            .await
            .map_err(|err| CredentialHasherError::hash(err.to_string()))??;
        Ok(PasswordDigest::from_phc(encoded))
    }

    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialHasherError> {
        let secret = Zeroizing::new(password.expose().as_bytes().to_vec());
        let encoded = digest.as_phc().to_owned();
        task::spawn_blocking(move || verify_blocking(&secret, &encoded))
            .await
            .map_err(|err| CredentialHasherError::hash(err.to_string()))?
    }
}
