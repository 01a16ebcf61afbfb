//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Store`, `*Cache`) are implemented by outbound adapters and
//! return [`PersistenceError`]. Driving ports (`*Command`, `*Query`) are
//! implemented by the domain services and return the domain `Error`.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod hash_job_cache;
mod hash_job_store;
mod hash_jobs_command;
mod hash_jobs_query;
mod persistence_error;
mod user_cache;
mod user_store;
mod users_command;
mod users_query;

pub use cache_key::CacheKey;
#[cfg(test)]
pub use hash_job_cache::MockHashJobCache;
pub use hash_job_cache::HashJobCache;
#[cfg(test)]
pub use hash_job_store::MockHashJobStore;
pub use hash_job_store::HashJobStore;
#[cfg(test)]
pub use hash_jobs_command::MockHashJobsCommand;
pub use hash_jobs_command::{CreateHashJobRequest, HashJobsCommand};
#[cfg(test)]
pub use hash_jobs_query::MockHashJobsQuery;
pub use hash_jobs_query::HashJobsQuery;
pub use persistence_error::{PersistenceError, PersistenceErrorKind};
#[cfg(test)]
pub use user_cache::MockUserCache;
pub use user_cache::UserCache;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::UserStore;
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{CreateUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
