//! Builders for the HTTP state from configured ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use focusfeed::composition::{memory_ports, mongo_ports};
use focusfeed::inbound::http::state::HttpState;

use super::ServerConfig;

/// Select MongoDB adapters when a store is configured, otherwise in-memory
/// ones, and wire the concept services over them.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.store {
        Some(store) => mongo_ports(store),
        None => {
            warn!("no MongoDB store configured; data will not survive a restart");
            memory_ports()
        }
    };
    web::Data::new(HttpState::new(ports, Arc::new(DefaultClock)))
}
