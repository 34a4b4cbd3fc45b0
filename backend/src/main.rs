//! Backend entry-point: loads configuration, wires adapters and serves HTTP.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use homework_backend::inbound::http::health::HealthState;
use homework_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use homework_backend::outbound::provider_config::BuildMode;
use ortho_config::OrthoConfig;
use server::{ServerConfig, ServerSettings, create_server, load_provider_settings};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("server settings: {err}")))?;
    let mode = BuildMode::from_debug_assertions();
    let providers = load_provider_settings(mode)?;

    let database_url = providers.database_url.clone();
    let mut config = ServerConfig::new(&settings, providers)?;
    if let Some(url) = database_url {
        let pool_config = settings.pool_config(url);
        config = config.with_db_pool(connect_store(pool_config, settings.run_migrations).await?);
    } else if settings.run_migrations {
        warn!("SOLVER_RUN_MIGRATIONS set without DATABASE_URL; skipping migrations");
    }

    let bind_addr = config.bind_addr;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, ?mode, "homework solver listening");
    server.await
}

async fn connect_store(pool_config: PoolConfig, run_migrations: bool) -> std::io::Result<DbPool> {
    if run_migrations {
        run_pending_migrations(Zeroizing::new(pool_config.database_url().to_owned()))
            .await
            .map_err(std::io::Error::other)?;
    }
    info!(
        max_size = pool_config.max_size(),
        checkout_timeout_secs = pool_config.connection_timeout().as_secs(),
        "connecting session store"
    );
    DbPool::new(pool_config).await.map_err(std::io::Error::other)
}
