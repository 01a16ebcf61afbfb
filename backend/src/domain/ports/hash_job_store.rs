//! Durable store port for hash jobs.

use async_trait::async_trait;

use crate::domain::{HashJob, HashJobId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HashJobStore: Send + Sync {
    /// Persist a new job. Fails with `CannotInsert` on a duplicate id.
    async fn insert_hash_job(&self, job: &HashJob) -> Result<(), PersistenceError>;

    /// Fetch a job by identifier; `NotFound` when absent.
    async fn get_hash_job(&self, id: &HashJobId) -> Result<HashJob, PersistenceError>;

    /// Remove a job. Fails with `CannotDelete` when no row matches.
    async fn delete_hash_job(&self, id: &HashJobId) -> Result<(), PersistenceError>;
}
