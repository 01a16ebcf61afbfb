//! Driving port for hash job mutations.

use async_trait::async_trait;

use crate::domain::{Error, HashJob, HashJobId, User};

/// Input for creating a hash job.
///
/// The owner is an already resolved [`User`], so an owner with blank fields
/// cannot reach the service. `None` means the caller could not resolve one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHashJobRequest {
    pub hashes: Vec<String>,
    pub owner: Option<User>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HashJobsCommand: Send + Sync {
    /// Create a `pending` job with a generated id.
    ///
    /// # Errors
    ///
    /// `invalid_request` for an empty hash list or a missing owner, raised
    /// before any store access.
    async fn create_hash_job(&self, request: CreateHashJobRequest) -> Result<HashJob, Error>;

    /// Delete a job from the store and evict it from the cache.
    async fn delete_hash_job(&self, id: &HashJobId) -> Result<(), Error>;
}
