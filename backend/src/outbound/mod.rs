//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL stores using Diesel
//! - **cache**: Redis cache using `bb8-redis`
//! - **memory**: process-local store and cache for development and tests
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod memory;
pub mod persistence;
mod pool_error;

pub use pool_error::PoolError;
