//! Backend entry-point: loads settings, connects storage and serves the API.

mod server;
mod settings;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use focusfeed::inbound::http::health::HealthState;
use focusfeed::inbound::http::session_config::{
    BuildMode, fingerprint::key_fingerprint, session_settings_from_env,
};
use focusfeed::outbound::persistence::{MongoStore, StoreConfig};
use server::{ServerConfig, create_server};
use settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("load settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("load session settings")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(session, bind_addr);
    if let Some(uri) = settings.mongo_uri() {
        let store = MongoStore::connect(&StoreConfig::new(uri, settings.database()))
            .await
            .wrap_err("connect to MongoDB")?;
        config = config.with_store(store);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).wrap_err("start HTTP server")?;
    info!(%bind_addr, "listening");
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
