//! Hash job service implementing the hash job driving ports.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CacheKey, CreateHashJobRequest, HashJobCache, HashJobStore, HashJobsCommand, HashJobsQuery,
};
use crate::domain::service_support::{
    invalid_field, log_cache_fallthrough, log_cache_write_failure, map_store_error,
};
use crate::domain::{Error, HashJob, HashJobId, HashJobValidationError};

const ENTITY: &str = "hash job";

fn invalid(error: HashJobValidationError) -> Error {
    invalid_field(error.field(), error.to_string())
}

/// Cache-aside service over a hash job store and cache.
pub struct HashJobService<S: ?Sized, C: ?Sized> {
    store: Arc<S>,
    cache: Arc<C>,
}

impl<S: ?Sized, C: ?Sized> HashJobService<S, C> {
    pub fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        Self { store, cache }
    }
}

impl<S: ?Sized, C: ?Sized> Clone for HashJobService<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S, C> HashJobService<S, C>
where
    S: HashJobStore + ?Sized,
    C: HashJobCache + ?Sized,
{
    async fn cache_job(&self, job: &HashJob) {
        if let Err(err) = self.cache.set_hash_job(job).await {
            log_cache_write_failure("set_hash_job", CacheKey::hash_job(job.id()).as_str(), &err);
        }
    }
}

#[async_trait]
impl<S, C> HashJobsCommand for HashJobService<S, C>
where
    S: HashJobStore + ?Sized,
    C: HashJobCache + ?Sized,
{
    async fn create_hash_job(&self, request: CreateHashJobRequest) -> Result<HashJob, Error> {
        let CreateHashJobRequest { hashes, owner } = request;
        if hashes.is_empty() {
            return Err(invalid(HashJobValidationError::EmptyHashes));
        }
        let owner = owner.ok_or_else(|| invalid(HashJobValidationError::MissingOwner))?;

        let job = HashJob::pending(owner.id().clone(), hashes).map_err(invalid)?;
        self.store
            .insert_hash_job(&job)
            .await
            .map_err(|err| map_store_error(ENTITY, &format!("id={}", job.id()), err))?;
        self.cache_job(&job).await;
        Ok(job)
    }

    async fn delete_hash_job(&self, id: &HashJobId) -> Result<(), Error> {
        self.store
            .delete_hash_job(id)
            .await
            .map_err(|err| map_store_error(ENTITY, &format!("id={id}"), err))?;
        if let Err(err) = self.cache.clear_hash_job(id).await {
            log_cache_write_failure("clear_hash_job", CacheKey::hash_job(id).as_str(), &err);
        }
        Ok(())
    }
}

#[async_trait]
impl<S, C> HashJobsQuery for HashJobService<S, C>
where
    S: HashJobStore + ?Sized,
    C: HashJobCache + ?Sized,
{
    async fn get_hash_job(&self, id: &HashJobId) -> Result<HashJob, Error> {
        match self.cache.get_hash_job(id).await {
            Ok(job) => return Ok(job),
            Err(err) => log_cache_fallthrough(CacheKey::hash_job(id).as_str(), &err),
        }
        let job = self
            .store
            .get_hash_job(id)
            .await
            .map_err(|err| map_store_error(ENTITY, &format!("id={id}"), err))?;
        self.cache_job(&job).await;
        Ok(job)
    }
}

#[cfg(test)]
#[path = "hash_job_service_tests.rs"]
mod tests;
