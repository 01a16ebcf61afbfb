//! Driving port for user mutations.
//!
//! Inbound adapters call this port to create and delete users without
//! touching the store or cache directly.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Raw input for creating a user; validated by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and persist a new user.
    ///
    /// # Errors
    ///
    /// - `invalid_request` when a field is blank.
    /// - `conflict` when the id, username or email is already registered.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Delete a user from the store and evict it from the cache.
    ///
    /// # Errors
    ///
    /// `not_found` when no such user exists.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
