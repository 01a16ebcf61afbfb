//! Internal Diesel row structs and document codecs.
//!
//! Rows are never exposed to the domain. Stored documents are decoded
//! leniently first so a record with an empty identifier can be reported as
//! missing rather than malformed.

use diesel::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::PersistenceError;
use crate::domain::{HashJob, HashJobId, HashJobStatus, User, UserId};

use super::schema::{hashjobs, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub data: Value,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub data: Value,
}

/// Row struct for reading from the hashjobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hashjobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HashJobRow {
    pub id: String,
    pub data: Value,
}

/// Insertable struct for creating new hash job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = hashjobs)]
pub(crate) struct NewHashJobRow<'a> {
    pub id: &'a str,
    pub data: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredUser {
    id: String,
    username: String,
    email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredHashJob {
    id: String,
    owner_id: String,
    status: HashJobStatus,
    hashes: Vec<String>,
}

fn malformed(entity: &str, row_id: &str, cause: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::serialization(format!("malformed {entity} record {row_id}: {cause}"))
}

pub(crate) fn encode_document<T: serde::Serialize>(value: &T) -> Result<Value, PersistenceError> {
    serde_json::to_value(value)
        .map_err(|err| PersistenceError::serialization(format!("encode document: {err}")))
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, PersistenceError> {
        let stored: StoredUser =
            serde_json::from_value(self.data).map_err(|err| malformed("user", &self.id, err))?;
        if stored.id.trim().is_empty() {
            return Err(PersistenceError::not_found(format!(
                "user record {} has no id",
                self.id
            )));
        }
        User::try_from_strings(stored.id, stored.username, stored.email)
            .map_err(|err| malformed("user", &self.id, err))
    }
}

impl HashJobRow {
    pub(crate) fn into_hash_job(self) -> Result<HashJob, PersistenceError> {
        let stored: StoredHashJob = serde_json::from_value(self.data)
            .map_err(|err| malformed("hash job", &self.id, err))?;
        if stored.id.trim().is_empty() {
            return Err(PersistenceError::not_found(format!(
                "hash job record {} has no id",
                self.id
            )));
        }
        let id = HashJobId::new(stored.id)
            .map_err(|err| malformed("hash job", &self.id, err))?;
        let owner_id = UserId::new(stored.owner_id)
            .map_err(|err| malformed("hash job", &self.id, err))?;
        HashJob::new(id, owner_id, stored.status, stored.hashes)
            .map_err(|err| malformed("hash job", &self.id, err))
    }
}
