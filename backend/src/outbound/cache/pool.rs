//! Connection pool for the Redis cache.
//!
//! Mirrors the PostgreSQL pool: a builder-style config and a cloneable pool
//! handle whose checkout failures map to [`PoolError`].

use std::time::Duration;

use bb8_redis::{RedisConnectionManager, bb8};

use crate::outbound::pool_error::PoolError;

/// Configuration for the Redis connection pool.
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    redis_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl RedisPoolConfig {
    /// Defaults: 10 connections and a 5 second checkout timeout.
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }
}

/// Pooled Redis connections.
#[derive(Clone)]
pub struct RedisPool {
    inner: bb8::Pool<RedisConnectionManager>,
}

impl RedisPool {
    /// Build the pool. Connections are opened lazily on first checkout.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Build` when the URL cannot be parsed.
    pub async fn new(config: RedisPoolConfig) -> Result<Self, PoolError> {
        let manager = RedisConnectionManager::new(config.redis_url.as_str())
            .map_err(|err| PoolError::build(err.to_string()))?;
        let inner = bb8::Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Checkout` when no connection is available within
    /// the configured timeout.
    pub async fn get(
        &self,
    ) -> Result<bb8::PooledConnection<'_, RedisConnectionManager>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_defaults() {
        let config = RedisPoolConfig::new("redis://localhost:6379/0");
        assert_eq!(config.redis_url(), "redis://localhost:6379/0");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn config_builder_overrides() {
        let config = RedisPoolConfig::new("redis://localhost")
            .with_max_size(4)
            .with_connection_timeout(Duration::from_millis(250));
        assert_eq!(config.max_size, 4);
        assert_eq!(config.connection_timeout, Duration::from_millis(250));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_url_fails_to_build() {
        let result = RedisPool::new(RedisPoolConfig::new("not a redis url")).await;
        assert!(matches!(result, Err(PoolError::Build { .. })));
    }
}
