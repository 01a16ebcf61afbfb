//! Driving port for hash job reads.

use async_trait::async_trait;

use crate::domain::{Error, HashJob, HashJobId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HashJobsQuery: Send + Sync {
    /// Fetch a job by id, consulting the cache first.
    async fn get_hash_job(&self, id: &HashJobId) -> Result<HashJob, Error>;
}
