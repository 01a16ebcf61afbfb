//! Builders for HTTP state ports.
//!
//! Each adapter pair is chosen from the configured pools, falling back to the
//! in-memory adapters when a pool is absent.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use unhash::domain::ports::{HashJobCache, HashJobStore, UserCache, UserStore};
use unhash::domain::{HashJobService, UserService};
use unhash::inbound::http::state::{HttpState, HttpStatePorts};
use unhash::outbound::cache::RedisCache;
use unhash::outbound::memory::{MemoryCache, MemoryStore};
use unhash::outbound::persistence::{DieselHashJobStore, DieselUserStore};

use super::ServerConfig;

type StorePair = (Arc<dyn UserStore>, Arc<dyn HashJobStore>);
type CachePair = (Arc<dyn UserCache>, Arc<dyn HashJobCache>);

/// Select a port pair from `pool`, or from `fallback` when no pool is set.
fn build_port_pair<Pool, A, B>(
    pool: &Option<Pool>,
    make: impl FnOnce(&Pool) -> (Arc<A>, Arc<B>),
    fallback: impl FnOnce() -> (Arc<A>, Arc<B>),
) -> (Arc<A>, Arc<B>)
where
    A: ?Sized,
    B: ?Sized,
{
    match pool {
        Some(pool) => make(pool),
        None => fallback(),
    }
}

fn build_stores(config: &ServerConfig) -> StorePair {
    build_port_pair(
        &config.db_pool,
        |pool| {
            (
                Arc::new(DieselUserStore::new(pool.clone())) as Arc<dyn UserStore>,
                Arc::new(DieselHashJobStore::new(pool.clone())) as Arc<dyn HashJobStore>,
            )
        },
        || {
            warn!("no database configured; users and hash jobs are kept in memory");
            let store = Arc::new(MemoryStore::new());
            (store.clone() as Arc<dyn UserStore>, store as Arc<dyn HashJobStore>)
        },
    )
}

fn build_caches(config: &ServerConfig) -> CachePair {
    let ttl = config.cache_ttl;
    build_port_pair(
        &config.redis_pool,
        |pool| {
            let cache = Arc::new(RedisCache::new(pool.clone(), ttl));
            (cache.clone() as Arc<dyn UserCache>, cache as Arc<dyn HashJobCache>)
        },
        || {
            warn!("no redis configured; using the in-process cache");
            let cache = Arc::new(MemoryCache::new(ttl, Arc::new(DefaultClock)));
            (cache.clone() as Arc<dyn UserCache>, cache as Arc<dyn HashJobCache>)
        },
    )
}

/// Wire the services over the selected adapters into shared HTTP state.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (user_store, hash_job_store) = build_stores(config);
    let (user_cache, hash_job_cache) = build_caches(config);
    let users = Arc::new(UserService::new(user_store, user_cache));
    let hash_jobs = Arc::new(HashJobService::new(hash_job_store, hash_job_cache));

    web::Data::new(HttpState::new(HttpStatePorts {
        users: users.clone(),
        users_query: users,
        hash_jobs: hash_jobs.clone(),
        hash_jobs_query: hash_jobs,
    }))
}
