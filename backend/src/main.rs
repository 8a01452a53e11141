//! Backend entry-point: loads settings, picks the record source, and serves
//! the screens over HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use userbank::domain::ports::RecordSource;
use userbank::inbound::http::health::HealthState;
use userbank::outbound::random_data::RandomDataHttpSource;
use userbank::outbound::synthetic::SyntheticRecordSource;
use userbank::settings::AppSettings;

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

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let initial_batch_size = settings
        .initial_batch_size()
        .map_err(std::io::Error::other)?;
    let source = build_source(&settings)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, initial_batch_size, source);
    let server = create_server(health_state, config).await?;
    server.await
}

fn build_source(settings: &AppSettings) -> std::io::Result<Arc<dyn RecordSource>> {
    if settings.synthetic {
        let seed = settings.synthetic_seed();
        info!(seed, "using synthetic record source");
        return Ok(Arc::new(SyntheticRecordSource::new(seed)));
    }

    let base_url = settings.source_url().map_err(std::io::Error::other)?;
    info!(%base_url, "using random-data record source");
    let source = RandomDataHttpSource::new(base_url, settings.request_timeout())
        .map_err(std::io::Error::other)?;
    Ok(Arc::new(source))
}
