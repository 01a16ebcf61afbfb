//! Durable store port for users.
//!
//! The store is the source of truth. Adapters enforce uniqueness of the id,
//! the username and the email, and report absent rows as
//! [`PersistenceError::NotFound`].

use async_trait::async_trait;

use crate::domain::{Email, User, UserId};

use super::PersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user.
    ///
    /// Fails with `CannotInsert` when the id, username or email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), PersistenceError>;

    /// Fetch a user by identifier.
    async fn get_user(&self, id: &UserId) -> Result<User, PersistenceError>;

    /// Fetch a user by email.
    async fn get_user_by_email(&self, email: &Email) -> Result<User, PersistenceError>;

    /// Every stored user; empty when the store is empty.
    async fn list_users(&self) -> Result<Vec<User>, PersistenceError>;

    /// Remove a user. Fails with `CannotDelete` when no row matches.
    async fn delete_user(&self, id: &UserId) -> Result<(), PersistenceError>;
}
