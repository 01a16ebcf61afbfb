//! PostgreSQL-backed `HashJobStore`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HashJobStore, PersistenceError};
use crate::domain::{HashJob, HashJobId};

use super::error_mapping::map_diesel_error;
use super::models::{HashJobRow, NewHashJobRow, encode_document};
use super::pool::DbPool;
use super::schema::hashjobs;

/// Diesel implementation of the [`HashJobStore`] port.
#[derive(Clone)]
pub struct DieselHashJobStore {
    pool: DbPool,
}

impl DieselHashJobStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HashJobStore for DieselHashJobStore {
    async fn insert_hash_job(&self, job: &HashJob) -> Result<(), PersistenceError> {
        let row = NewHashJobRow {
            id: job.id().as_str(),
            data: encode_document(job)?,
        };
        let mut conn = self.pool.get().await?;
        diesel::insert_into(hashjobs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn get_hash_job(&self, id: &HashJobId) -> Result<HashJob, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = hashjobs::table
            .find(id.as_str())
            .select(HashJobRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.ok_or_else(|| PersistenceError::not_found(format!("hash job id={id}")))?
            .into_hash_job()
    }

    async fn delete_hash_job(&self, id: &HashJobId) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(hashjobs::table.find(id.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(PersistenceError::cannot_delete(format!(
                "no hash job with id={id}"
            )));
        }
        Ok(())
    }
}
