//! Cache port for hash jobs. Single-key analogue of [`super::UserCache`].

use async_trait::async_trait;

use crate::domain::{HashJob, HashJobId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HashJobCache: Send + Sync {
    async fn get_hash_job(&self, id: &HashJobId) -> Result<HashJob, PersistenceError>;

    async fn set_hash_job(&self, job: &HashJob) -> Result<(), PersistenceError>;

    async fn clear_hash_job(&self, id: &HashJobId) -> Result<(), PersistenceError>;
}
