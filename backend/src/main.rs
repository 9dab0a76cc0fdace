//! Backend entry-point: loads settings, prepares the database and serves the
//! fest REST API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fest_backend::config::FestSettings;
use fest_backend::inbound::http::health::HealthState;
use fest_backend::outbound::persistence::{DbPool, run_pending_migrations};
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

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

    let settings = FestSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    if settings.run_migrations() {
        run_pending_migrations(&settings.database_url)
            .await
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
    }

    let pool = DbPool::new(settings.pool_config())
        .await
        .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, pool))?;
    info!(%bind_addr, "fest backend listening");
    server.await
}
