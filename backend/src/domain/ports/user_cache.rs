//! Cache port for users.
//!
//! The cache is a disposable copy of store rows with a bounded lifetime. A
//! user is written under two keys (id and email) so both lookups can hit.
//! Misses and expired entries surface as [`PersistenceError::NotFound`];
//! callers treat every error as a reason to fall through to the store.

use async_trait::async_trait;

use crate::domain::{Email, User, UserId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCache: Send + Sync {
    async fn get_user(&self, id: &UserId) -> Result<User, PersistenceError>;

    async fn get_user_by_email(&self, email: &Email) -> Result<User, PersistenceError>;

    /// Write the user under its id and email keys with the configured TTL.
    async fn set_user(&self, user: &User) -> Result<(), PersistenceError>;

    /// Remove both keys for the user.
    async fn clear_user(&self, user: &User) -> Result<(), PersistenceError>;

    /// Remove the id key when the email of the user is unknown.
    async fn clear_user_id(&self, id: &UserId) -> Result<(), PersistenceError>;
}
