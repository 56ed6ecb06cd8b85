//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use focusfeed::inbound::http::session_config::SessionSettings;
use focusfeed::outbound::persistence::MongoStore;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Option<MongoStore>,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and a bind
    /// address. Without a store the server runs on in-memory adapters.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            store: None,
        }
    }

    /// Attach a MongoDB store for the persistence adapters.
    #[must_use]
    pub fn with_store(mut self, store: MongoStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by server tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
