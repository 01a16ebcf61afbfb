//! Errors shared by the PostgreSQL and Redis connection pools.

use tracing::debug;

use crate::domain::ports::PersistenceError;

/// Errors that can occur while building or using a connection pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

impl From<PoolError> for PersistenceError {
    fn from(error: PoolError) -> Self {
        debug!(%error, "connection pool failure");
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                PersistenceError::connection(message)
            }
        }
    }
}
