//! JSON payload encoding shared by the cache adapters.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::ports::PersistenceError;

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<String, PersistenceError> {
    serde_json::to_string(value)
        .map_err(|err| PersistenceError::serialization(format!("encode cache payload: {err}")))
}

pub(crate) fn decode<T: DeserializeOwned>(key: &str, payload: &str) -> Result<T, PersistenceError> {
    serde_json::from_str(payload).map_err(|err| {
        PersistenceError::serialization(format!("decode cache payload at {key}: {err}"))
    })
}
