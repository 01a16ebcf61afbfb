//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed entities (users and hash jobs), the
//! ports the services depend on, and the cache-aside services that inbound
//! adapters call. Nothing here knows about HTTP, PostgreSQL or Redis.

pub mod error;
pub mod hash_job;
pub mod hash_job_service;
pub mod ports;
mod service_support;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::hash_job::{HashJob, HashJobId, HashJobStatus, HashJobValidationError};
pub use self::hash_job_service::HashJobService;
pub use self::trace_id::TraceId;
pub use self::user::{Email, User, UserId, UserValidationError, Username};
pub use self::user_service::UserService;
