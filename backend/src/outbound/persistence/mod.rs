//! PostgreSQL persistence adapters.
//!
//! Implements the store ports with Diesel over a `diesel-async` bb8 pool.
//! Each entity lives in its own table as a JSONB document keyed by id.

mod diesel_hash_job_store;
mod diesel_user_store;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_hash_job_store::DieselHashJobStore;
pub use diesel_user_store::DieselUserStore;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations, truncate_all};
pub use pool::{DbPool, PoolConfig};
