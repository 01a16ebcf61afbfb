//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Email, Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch a user by id, consulting the cache first.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;

    /// Fetch a user by email, consulting the cache first.
    async fn get_user_by_email(&self, email: &Email) -> Result<User, Error>;

    /// List every user. Always served from the store.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
