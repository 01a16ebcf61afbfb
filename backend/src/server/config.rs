//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use unhash::outbound::cache::{CacheTtl, RedisPool};
use unhash::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
///
/// Without a database pool the in-memory store is used; without a Redis pool
/// the in-memory cache is used.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) redis_pool: Option<RedisPool>,
    pub(crate) cache_ttl: CacheTtl,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            redis_pool: None,
            cache_ttl: CacheTtl::default(),
        }
    }

    /// Attach a database connection pool for the Diesel store adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach a Redis connection pool for the Redis cache adapter.
    #[must_use]
    pub fn with_redis_pool(mut self, pool: RedisPool) -> Self {
        self.redis_pool = Some(pool);
        self
    }

    /// Set the lifetime policy applied to cache writes.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: CacheTtl) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
