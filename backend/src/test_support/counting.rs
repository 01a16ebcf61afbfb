//! Store decorator that counts calls, for asserting cache effectiveness.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{HashJobStore, PersistenceError, UserStore};
use crate::domain::{Email, HashJob, HashJobId, User, UserId};
use crate::outbound::memory::MemoryStore;

/// Wraps a [`MemoryStore`] and records how often each read reaches it.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    user_reads: AtomicUsize,
    hash_job_reads: AtomicUsize,
    inserts: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads by id or email that reached the store.
    pub fn user_reads(&self) -> usize {
        self.user_reads.load(Ordering::SeqCst)
    }

    pub fn hash_job_reads(&self) -> usize {
        self.hash_job_reads.load(Ordering::SeqCst)
    }

    /// Insert attempts of either entity, successful or not.
    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Reset every counter, typically after test setup.
    pub fn reset(&self) {
        self.user_reads.store(0, Ordering::SeqCst);
        self.hash_job_reads.store(0, Ordering::SeqCst);
        self.inserts.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn insert_user(&self, user: &User) -> Result<(), PersistenceError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_user(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, PersistenceError> {
        self.user_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_user(id).await
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, PersistenceError> {
        self.user_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_user_by_email(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>, PersistenceError> {
        self.inner.list_users().await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), PersistenceError> {
        self.inner.delete_user(id).await
    }
}

#[async_trait]
impl HashJobStore for CountingStore {
    async fn insert_hash_job(&self, job: &HashJob) -> Result<(), PersistenceError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_hash_job(job).await
    }

    async fn get_hash_job(&self, id: &HashJobId) -> Result<HashJob, PersistenceError> {
        self.hash_job_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_hash_job(id).await
    }

    async fn delete_hash_job(&self, id: &HashJobId) -> Result<(), PersistenceError> {
        self.inner.delete_hash_job(id).await
    }
}
