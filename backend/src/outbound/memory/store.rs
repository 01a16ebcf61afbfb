//! In-memory durable store.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{HashJobStore, PersistenceError, UserStore};
use crate::domain::{Email, HashJob, HashJobId, User, UserId};

use super::poisoned;

/// Store backed by in-process maps.
///
/// Enforces the same uniqueness rules as the PostgreSQL schema: id, username
/// and email are each unique across users.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<BTreeMap<String, User>>,
    hash_jobs: RwLock<HashMap<String, HashJob>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), PersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.contains_key(user.id().as_str()) {
            return Err(PersistenceError::cannot_insert(format!(
                "user id {} already exists",
                user.id()
            )));
        }
        if let Some(clash) = users.values().find(|existing| {
            existing.username() == user.username() || existing.email() == user.email()
        }) {
            let field = if clash.email() == user.email() {
                "email"
            } else {
                "username"
            };
            return Err(PersistenceError::cannot_insert(format!(
                "user {field} already exists"
            )));
        }
        users.insert(user.id().to_string(), user.clone());
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, PersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        users
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| PersistenceError::not_found(format!("user id={id}")))
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, PersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        users
            .values()
            .find(|user| user.email() == email)
            .cloned()
            .ok_or_else(|| PersistenceError::not_found(format!("user email={email}")))
    }

    async fn list_users(&self) -> Result<Vec<User>, PersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.values().cloned().collect())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), PersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        users
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| PersistenceError::cannot_delete(format!("no user with id={id}")))
    }
}

#[async_trait]
impl HashJobStore for MemoryStore {
    async fn insert_hash_job(&self, job: &HashJob) -> Result<(), PersistenceError> {
        let mut jobs = self.hash_jobs.write().map_err(poisoned)?;
        if jobs.contains_key(job.id().as_str()) {
            return Err(PersistenceError::cannot_insert(format!(
                "hash job id {} already exists",
                job.id()
            )));
        }
        jobs.insert(job.id().to_string(), job.clone());
        Ok(())
    }

    async fn get_hash_job(&self, id: &HashJobId) -> Result<HashJob, PersistenceError> {
        let jobs = self.hash_jobs.read().map_err(poisoned)?;
        jobs.get(id.as_str())
            .cloned()
            .ok_or_else(|| PersistenceError::not_found(format!("hash job id={id}")))
    }

    async fn delete_hash_job(&self, id: &HashJobId) -> Result<(), PersistenceError> {
        let mut jobs = self.hash_jobs.write().map_err(poisoned)?;
        jobs.remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| PersistenceError::cannot_delete(format!("no hash job with id={id}")))
    }
}
