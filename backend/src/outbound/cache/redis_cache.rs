//! Redis-backed cache adapter.
//!
//! Entities are stored as JSON strings with `SET … EX`. The two keys of a
//! user are written in one `MULTI` pipeline so a reader never sees one key
//! without the other; clears use a single `DEL`.

use async_trait::async_trait;
use bb8_redis::redis;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::{CacheKey, HashJobCache, PersistenceError, UserCache};
use crate::domain::{Email, HashJob, HashJobId, User, UserId};

use super::CacheTtl;
use super::codec::{decode, encode};
use super::pool::RedisPool;

fn map_redis_error(error: redis::RedisError) -> PersistenceError {
    debug!(%error, "redis command failed");
    if error.is_io_error()
        || error.is_connection_refusal()
        || error.is_connection_dropped()
        || error.is_timeout()
    {
        PersistenceError::connection(error.to_string())
    } else {
        PersistenceError::query(error.to_string())
    }
}

/// Cache adapter over a [`RedisPool`].
#[derive(Clone)]
pub struct RedisCache {
    pool: RedisPool,
    ttl: CacheTtl,
}

impl RedisCache {
    pub fn new(pool: RedisPool, ttl: CacheTtl) -> Self {
        Self { pool, ttl }
    }

    /// Drop every key in the selected database.
    ///
    /// Used by the `clear_on_startup` development switch.
    pub async fn flush(&self) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let () = redis::cmd("FLUSHDB")
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn read<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<T, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let payload: Option<String> = redis::cmd("GET")
            .arg(key.as_str())
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        match payload {
            Some(payload) => decode(key.as_str(), &payload),
            None => Err(PersistenceError::not_found(format!("cache miss: {key}"))),
        }
    }

    async fn write<T: Serialize>(
        &self,
        keys: &[CacheKey],
        value: &T,
    ) -> Result<(), PersistenceError> {
        let payload = encode(value)?;
        let ttl_secs = self.ttl.next_ttl().as_secs();
        let mut pipe = redis::pipe();
        pipe.atomic();
        for key in keys {
            pipe.cmd("SET")
                .arg(key.as_str())
                .arg(payload.as_str())
                .arg("EX")
                .arg(ttl_secs)
                .ignore();
        }
        let mut conn = self.pool.get().await?;
        let () = pipe
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn remove(&self, keys: &[CacheKey]) -> Result<(), PersistenceError> {
        let mut command = redis::cmd("DEL");
        for key in keys {
            command.arg(key.as_str());
        }
        let mut conn = self.pool.get().await?;
        let removed: i64 = command
            .query_async(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        debug!(removed, "evicted cache keys");
        Ok(())
    }
}

#[async_trait]
impl UserCache for RedisCache {
    async fn get_user(&self, id: &UserId) -> Result<User, PersistenceError> {
        self.read(&CacheKey::user_id(id)).await
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, PersistenceError> {
        self.read(&CacheKey::user_email(email)).await
    }

    async fn set_user(&self, user: &User) -> Result<(), PersistenceError> {
        let keys = [CacheKey::user_id(user.id()), CacheKey::user_email(user.email())];
        self.write(&keys, user).await
    }

    async fn clear_user(&self, user: &User) -> Result<(), PersistenceError> {
        let keys = [CacheKey::user_id(user.id()), CacheKey::user_email(user.email())];
        self.remove(&keys).await
    }

    async fn clear_user_id(&self, id: &UserId) -> Result<(), PersistenceError> {
        self.remove(&[CacheKey::user_id(id)]).await
    }
}

#[async_trait]
impl HashJobCache for RedisCache {
    async fn get_hash_job(&self, id: &HashJobId) -> Result<HashJob, PersistenceError> {
        self.read(&CacheKey::hash_job(id)).await
    }

    async fn set_hash_job(&self, job: &HashJob) -> Result<(), PersistenceError> {
        self.write(&[CacheKey::hash_job(job.id())], job).await
    }

    async fn clear_hash_job(&self, id: &HashJobId) -> Result<(), PersistenceError> {
        self.remove(&[CacheKey::hash_job(id)]).await
    }
}
