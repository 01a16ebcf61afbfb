//! Failure taxonomy shared by store and cache adapters.
//!
//! Four kinds are classified so services can branch on them: `NotFound`,
//! `CannotInsert`, `CannotDelete` and `CannotUpdate`. Every other variant is
//! reported as [`PersistenceErrorKind::Unclassified`]. Each variant carries a
//! free-form cause that is informational only; comparisons by kind ignore it.

use super::define_port_error;

define_port_error! {
    /// Errors raised by store and cache adapters.
    pub enum PersistenceError {
        /// No row or cache entry matched the lookup.
        NotFound { message: String } => "not found: {message}",
        /// The record could not be inserted (usually a uniqueness violation).
        CannotInsert { message: String } => "cannot insert: {message}",
        /// The record could not be deleted (absent or backend failure).
        CannotDelete { message: String } => "cannot delete: {message}",
        /// The record could not be updated.
        CannotUpdate { message: String } => "cannot update: {message}",
        /// The record was rejected before any I/O took place.
        InvalidRecord { message: String } => "invalid record: {message}",
        /// The backend could not be reached.
        Connection { message: String } => "connection failed: {message}",
        /// The backend rejected or failed the query.
        Query { message: String } => "query failed: {message}",
        /// A stored payload could not be encoded or decoded.
        Serialization { message: String } => "serialization failed: {message}",
    }
}

/// Classification of a [`PersistenceError`], ignoring its cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistenceErrorKind {
    NotFound,
    CannotInsert,
    CannotDelete,
    CannotUpdate,
    Unclassified,
}

impl PersistenceError {
    /// Classify the error.
    pub fn kind(&self) -> PersistenceErrorKind {
        match self {
            Self::NotFound { .. } => PersistenceErrorKind::NotFound,
            Self::CannotInsert { .. } => PersistenceErrorKind::CannotInsert,
            Self::CannotDelete { .. } => PersistenceErrorKind::CannotDelete,
            Self::CannotUpdate { .. } => PersistenceErrorKind::CannotUpdate,
            Self::InvalidRecord { .. }
            | Self::Connection { .. }
            | Self::Query { .. }
            | Self::Serialization { .. } => PersistenceErrorKind::Unclassified,
        }
    }

    /// Whether the error is of `kind`, regardless of its cause.
    ///
    /// # Examples
    /// ```
    /// use unhash::domain::ports::{PersistenceError, PersistenceErrorKind};
    ///
    /// let err = PersistenceError::not_found("user id=42");
    /// assert!(err.is(PersistenceErrorKind::NotFound));
    /// assert!(!err.is(PersistenceErrorKind::CannotDelete));
    /// ```
    pub fn is(&self, kind: PersistenceErrorKind) -> bool {
        self.kind() == kind
    }

    /// Shorthand for `is(PersistenceErrorKind::NotFound)`.
    pub fn is_not_found(&self) -> bool {
        self.is(PersistenceErrorKind::NotFound)
    }
}
