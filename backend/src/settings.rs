//! Process settings loaded via OrthoConfig.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE: &str = "focusfeed";

/// Raised when `FOCUSFEED_BIND_ADDR` is not a socket address.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind address {value}: {source}")]
pub struct BindAddrError {
    value: String,
    #[source]
    source: std::net::AddrParseError,
}

/// Listener and storage settings. Session cookie settings are read
/// separately by `session_settings_from_env`.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOCUSFEED")]
pub struct AppSettings {
    /// Address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// MongoDB connection string. Without it the server keeps data in memory.
    pub mongo_uri: Option<String>,
    /// Database holding the concept collections.
    pub database: Option<String>,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| BindAddrError {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the configured database name, falling back to the default.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Return the MongoDB URI when one is set and non-blank.
    pub fn mongo_uri(&self) -> Option<&str> {
        self.mongo_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
    }
}
