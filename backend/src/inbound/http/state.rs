//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{HashJobsCommand, HashJobsQuery, UsersCommand, UsersQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub hash_jobs: Arc<dyn HashJobsCommand>,
    pub hash_jobs_query: Arc<dyn HashJobsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub hash_jobs: Arc<dyn HashJobsCommand>,
    pub hash_jobs_query: Arc<dyn HashJobsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use unhash::domain::{HashJobService, UserService};
    /// use unhash::inbound::http::state::{HttpState, HttpStatePorts};
    /// use unhash::outbound::cache::CacheTtl;
    /// use unhash::outbound::memory::{MemoryCache, MemoryStore};
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let cache = Arc::new(MemoryCache::new(
    ///     CacheTtl::default(),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let users = Arc::new(UserService::new(store.clone(), cache.clone()));
    /// let hash_jobs = Arc::new(HashJobService::new(store, cache));
    /// let state = HttpState::new(HttpStatePorts {
    ///     users: users.clone(),
    ///     users_query: users,
    ///     hash_jobs: hash_jobs.clone(),
    ///     hash_jobs_query: hash_jobs,
    /// });
    /// let _users = state.users_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            users_query,
            hash_jobs,
            hash_jobs_query,
        } = ports;
        Self {
            users,
            users_query,
            hash_jobs,
            hash_jobs_query,
        }
    }
}
