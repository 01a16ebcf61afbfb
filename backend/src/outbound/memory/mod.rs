//! Process-local adapters used when no database or Redis is configured.
//!
//! Both adapters keep their state behind `std::sync::RwLock`; no guard is held
//! across an await point.

mod cache;
mod store;

pub use cache::MemoryCache;
pub use store::MemoryStore;

use std::sync::PoisonError;

use crate::domain::ports::PersistenceError;

fn poisoned<T>(_: PoisonError<T>) -> PersistenceError {
    PersistenceError::query("in-memory state lock poisoned")
}
