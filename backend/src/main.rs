//! Backend entry-point: configuration, migrations, pool, and server wiring.

use std::sync::Arc;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::api::HttpState;
use backend::outbound::persistence::{DbPool, DieselStorage, PoolConfig, migrations};
use backend::server::{AppConfig, ServerConfig};

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

    let config = AppConfig::parse();
    let key = config.load_session_key()?;

    if config.run_migrations {
        migrations::run_pending(&config.database_url).map_err(std::io::Error::other)?;
    }

    let pool = DbPool::new(PoolConfig::new(&config.database_url).with_max_size(config.pool_max))
        .await
        .map_err(std::io::Error::other)?;
    let state = HttpState::new(Arc::new(DieselStorage::new(pool)));

    backend::server::run(ServerConfig {
        key,
        cookie_secure: config.cookie_secure,
        bind_addr: config.bind_addr,
        state,
    })
    .await
}
