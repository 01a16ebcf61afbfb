//! Backend entry-point: loads settings, prepares the adapters and serves the REST API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, shutdown_on_signal};
use unhash::inbound::http::health::HealthState;
use unhash::outbound::cache::{RedisCache, RedisPool, RedisPoolConfig};
use unhash::outbound::persistence::{DbPool, PoolConfig, run_migrations, truncate_all};
use unhash::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("invalid bind address: {e}"))
    })?;
    let cache_ttl = settings.cache_ttl();
    let mut config = ServerConfig::new(bind_addr).with_cache_ttl(cache_ttl);

    if let Some(database_url) = settings.database_url.as_deref() {
        run_migrations(database_url).await.map_err(io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(io::Error::other)?;
        if settings.clear_on_startup {
            truncate_all(&pool).await.map_err(io::Error::other)?;
        }
        config = config.with_db_pool(pool);
    }

    if let Some(redis_url) = settings.redis_url.as_deref() {
        let pool = RedisPool::new(RedisPoolConfig::new(redis_url))
            .await
            .map_err(io::Error::other)?;
        if settings.clear_on_startup {
            RedisCache::new(pool.clone(), cache_ttl)
                .flush()
                .await
                .map_err(io::Error::other)?;
            info!("flushed cache database");
        }
        config = config.with_redis_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new(settings.environment()));
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(shutdown_on_signal(server.handle(), health_state));
    info!(%bind_addr, environment = settings.environment(), "server listening");
    server.await
}
