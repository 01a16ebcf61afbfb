//! Internal helpers shared by the entity services.

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::ports::PersistenceError;

/// Translate a store failure into a domain error.
///
/// `entity` and `lookup` only shape the message, e.g. `user not found: id=42`.
pub(crate) fn map_store_error(entity: &str, lookup: &str, error: PersistenceError) -> Error {
    match error {
        PersistenceError::NotFound { .. } | PersistenceError::CannotDelete { .. } => {
            Error::not_found(format!("{entity} not found: {lookup}"))
        }
        PersistenceError::CannotInsert { message } => {
            Error::conflict(format!("{entity} already exists: {lookup}"))
                .with_details(json!({ "reason": message }))
        }
        PersistenceError::Connection { message } => {
            Error::service_unavailable(format!("{entity} store unavailable: {message}"))
        }
        other => Error::internal(format!("{entity} store failure: {other}")),
    }
}

/// Build the `invalid_request` error for a rejected field.
pub(crate) fn invalid_field(field: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": "invalid" }))
}

/// Build the `conflict` error for a field that is already taken.
pub(crate) fn duplicate_field(entity: &str, field: &str, value: &str) -> Error {
    Error::conflict(format!("{entity} already exists: {field}={value}"))
        .with_details(json!({ "field": field, "code": "duplicate" }))
}

/// Record a cache read that fell through to the store.
pub(crate) fn log_cache_fallthrough(key: &str, error: &PersistenceError) {
    if error.is_not_found() {
        debug!(key, "cache miss");
    } else {
        warn!(key, %error, "cache read failed; falling back to store");
    }
}

/// Record a best-effort cache write or eviction that failed.
pub(crate) fn log_cache_write_failure(operation: &'static str, key: &str, error: &PersistenceError) {
    warn!(operation, key, %error, "best-effort cache update failed");
}
