//! PostgreSQL-backed `UserStore`.
//!
//! Users live in `users(id, data)`; the email lookup filters on the
//! `data->>'email'` expression, which is backed by a unique index.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{PersistenceError, UserStore};
use crate::domain::{Email, User, UserId};

use super::error_mapping::map_diesel_error;
use super::models::{NewUserRow, UserRow, encode_document};
use super::pool::DbPool;
use super::schema::users;

const SELECT_BY_EMAIL_SQL: &str = "SELECT id, data FROM users WHERE data->>'email' = $1 LIMIT 1";

/// Diesel implementation of the [`UserStore`] port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn insert_user(&self, user: &User) -> Result<(), PersistenceError> {
        let row = NewUserRow {
            id: user.id().as_str(),
            data: encode_document(user)?,
        };
        let mut conn = self.pool.get().await?;
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row = users::table
            .find(id.as_str())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.ok_or_else(|| PersistenceError::not_found(format!("user id={id}")))?
            .into_user()
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row: Option<UserRow> = sql_query(SELECT_BY_EMAIL_SQL)
            .bind::<Text, _>(email.as_str())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.ok_or_else(|| PersistenceError::not_found(format!("user email={email}")))?
            .into_user()
    }

    async fn list_users(&self) -> Result<Vec<User>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut found = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_user() {
                Ok(user) => found.push(user),
                Err(err) if err.is_not_found() => {
                    warn!(%err, "skipping user record without an id");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(found)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(users::table.find(id.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(PersistenceError::cannot_delete(format!("no user with id={id}")));
        }
        Ok(())
    }
}
