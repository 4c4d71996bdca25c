//! Service entry-point: loads settings, wires the store and serves HTTP.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use user_directory::config::AppSettings;
use user_directory::inbound::http::health::HealthState;
use user_directory::server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let config = ServerConfig::from(&settings);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, Arc::new(DefaultClock))?;
    server.await
}
