//! Cache adapters.
//!
//! [`RedisCache`] is the production adapter; it pools connections with
//! `bb8-redis`, serialises entities as JSON and applies a TTL with optional
//! jitter. The in-memory fallback lives in `outbound::memory`.

pub(crate) mod codec;
mod pool;
mod redis_cache;
mod ttl;

pub use pool::{RedisPool, RedisPoolConfig};
pub use redis_cache::RedisCache;
pub use ttl::{CacheTtl, DEFAULT_CACHE_TTL};
