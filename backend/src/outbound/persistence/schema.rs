//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Entities are
//! stored as JSONB documents; only the primary key is a real column.

diesel::table! {
    /// Registered users. `data` holds `{id, username, email}`.
    users (id) {
        id -> Text,
        data -> Jsonb,
    }
}

diesel::table! {
    /// Submitted hash jobs. `data` holds `{id, ownerId, status, hashes}`.
    hashjobs (id) {
        id -> Text,
        data -> Jsonb,
    }
}
