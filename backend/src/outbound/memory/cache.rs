//! In-memory TTL cache.
//!
//! Entries are stored as JSON, the same as in Redis, so a payload that no
//! longer decodes surfaces as a serialization failure rather than a panic.
//! Expiry is computed from the injected clock. Expired entries are evicted
//! when their key is read and swept from the whole map on every write.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::ports::{CacheKey, HashJobCache, PersistenceError, UserCache};
use crate::domain::{Email, HashJob, HashJobId, User, UserId};
use crate::outbound::cache::CacheTtl;
use crate::outbound::cache::codec::{decode, encode};

use super::poisoned;

#[derive(Debug, Clone)]
struct Entry {
    payload: String,
    expires_at: DateTime<Utc>,
}

/// Cache backed by an in-process map.
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, Entry>>,
    ttl: CacheTtl,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(ttl: CacheTtl, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    fn ttl_delta(&self) -> Result<TimeDelta, PersistenceError> {
        TimeDelta::from_std(self.ttl.next_ttl()).map_err(|err| {
            PersistenceError::invalid_record(format!("cache ttl out of range: {err}"))
        })
    }

    fn read<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<T, PersistenceError> {
        let now = self.clock.utc();
        let mut entries = self.entries.write().map_err(poisoned)?;
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => decode(key.as_str(), &entry.payload),
            Some(_) => {
                entries.remove(key);
                Err(PersistenceError::not_found(format!("cache entry expired: {key}")))
            }
            None => Err(PersistenceError::not_found(format!("cache miss: {key}"))),
        }
    }

    fn write<T: Serialize>(&self, keys: &[CacheKey], value: &T) -> Result<(), PersistenceError> {
        let payload = encode(value)?;
        let now = self.clock.utc();
        let expires_at = now + self.ttl_delta()?;
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.retain(|_, entry| entry.expires_at > now);
        for key in keys {
            entries.insert(
                key.clone(),
                Entry {
                    payload: payload.clone(),
                    expires_at,
                },
            );
        }
        Ok(())
    }

    fn remove(&self, keys: &[CacheKey]) -> Result<(), PersistenceError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}

#[async_trait]
impl UserCache for MemoryCache {
    async fn get_user(&self, id: &UserId) -> Result<User, PersistenceError> {
        self.read(&CacheKey::user_id(id))
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, PersistenceError> {
        self.read(&CacheKey::user_email(email))
    }

    async fn set_user(&self, user: &User) -> Result<(), PersistenceError> {
        self.write(
            &[CacheKey::user_id(user.id()), CacheKey::user_email(user.email())],
            user,
        )
    }

    async fn clear_user(&self, user: &User) -> Result<(), PersistenceError> {
        self.remove(&[CacheKey::user_id(user.id()), CacheKey::user_email(user.email())])
    }

    async fn clear_user_id(&self, id: &UserId) -> Result<(), PersistenceError> {
        self.remove(&[CacheKey::user_id(id)])
    }
}

#[async_trait]
impl HashJobCache for MemoryCache {
    async fn get_hash_job(&self, id: &HashJobId) -> Result<HashJob, PersistenceError> {
        self.read(&CacheKey::hash_job(id))
    }

    async fn set_hash_job(&self, job: &HashJob) -> Result<(), PersistenceError> {
        self.write(&[CacheKey::hash_job(job.id())], job)
    }

    async fn clear_hash_job(&self, id: &HashJobId) -> Result<(), PersistenceError> {
        self.remove(&[CacheKey::hash_job(id)])
    }
}
