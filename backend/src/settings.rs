//! Application configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `UNHASH_*` environment variables and an
//! optional configuration file, in that order of precedence. Absent
//! `database_url`/`redis_url` select the in-memory adapters.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::cache::CacheTtl;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime settings for the `unhash` server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "UNHASH")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Deployment environment reported by the healthcheck.
    pub environment: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Redis connection string.
    pub redis_url: Option<String>,
    /// Base cache entry lifetime in seconds.
    pub cache_ttl_secs: Option<u64>,
    /// Upper bound of the random extra lifetime added per cache write.
    pub cache_ttl_jitter_secs: Option<u64>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Truncate tables and flush the cache before serving.
    #[ortho_config(default = false)]
    pub clear_on_startup: bool,
}

impl AppSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns the parse error when the configured value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Return the configured environment name, falling back to `development`.
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Cache lifetime policy derived from the TTL settings.
    pub fn cache_ttl(&self) -> CacheTtl {
        let base = Duration::from_secs(self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS));
        let jitter = Duration::from_secs(self.cache_ttl_jitter_secs.unwrap_or(0));
        CacheTtl::new(base).with_jitter(jitter)
    }

    /// Return the database pool size, falling back to 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}
