//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape of their domain counterparts
//! (camelCase field names) but live in the inbound adapter layer where
//! framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with an existing resource.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "email must not be empty")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Unique login name.
    #[schema(example = "ada")]
    username: String,
    /// Unique contact address.
    #[schema(example = "ada@example.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::HashJobStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HashJobStatus)]
pub enum HashJobStatusSchema {
    #[schema(rename = "pending")]
    Pending,
    #[schema(rename = "running")]
    Running,
    #[schema(rename = "done")]
    Done,
    #[schema(rename = "error")]
    Error,
}

/// OpenAPI schema for [`crate::domain::HashJob`].
///
/// A batch of hashes submitted by a user for processing.
#[derive(ToSchema)]
#[schema(as = crate::domain::HashJob, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HashJobSchema {
    /// Stable job identifier.
    #[schema(example = "0b6f1d9e-8f0a-4c1b-9a43-5b8f7f4c2d10")]
    id: String,
    /// Identifier of the submitting user.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    owner_id: String,
    /// Processing state.
    status: HashJobStatusSchema,
    /// Submitted hashes in submission order.
    #[schema(example = json!(["5f4dcc3b5aa765d61d8327deb882cf99"]))]
    hashes: Vec<String>,
}
