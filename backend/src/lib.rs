//! Cache-aside access layer for users and hash jobs.
//!
//! The [`domain`] owns the entities, ports and services; [`outbound`] holds
//! the PostgreSQL, Redis and in-memory adapters; [`inbound`] exposes the
//! services over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[doc(hidden)]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
