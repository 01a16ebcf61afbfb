//! Diesel error mapping shared by the PostgreSQL stores.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::PersistenceError;

/// Map a Diesel error into the persistence taxonomy.
///
/// Unique violations become `CannotInsert` so services can answer with a
/// conflict; a closed connection is a `Connection` failure.
pub(crate) fn map_diesel_error(error: DieselError) -> PersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => PersistenceError::not_found("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            PersistenceError::cannot_insert(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        DieselError::DeserializationError(err) | DieselError::SerializationError(err) => {
            PersistenceError::serialization(err.to_string())
        }
        DieselError::QueryBuilderError(_) => PersistenceError::query("database query error"),
        _ => PersistenceError::query("database error"),
    }
}
