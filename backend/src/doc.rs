//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (users, hash jobs,
//!   health)
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`UserSchema`], [`HashJobSchema`], [`HashJobStatusSchema`]) that provide
//!   OpenAPI definitions without coupling domain types to the utoipa framework
//!
//! The generated specification is served by Swagger UI in debug builds.

use crate::inbound::http::hash_jobs::CreateHashJobBody;
use crate::inbound::http::health::HealthcheckResponse;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, HashJobSchema, HashJobStatusSchema, UserSchema,
};
use crate::inbound::http::users::CreateUserBody;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "unhash API",
        description = "Users and hash jobs served through a cache-aside store."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::get_user_by_email,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::hash_jobs::create_hash_job,
        crate::inbound::http::hash_jobs::get_hash_job,
        crate::inbound::http::hash_jobs::delete_hash_job,
        crate::inbound::http::health::healthcheck,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        HashJobSchema,
        HashJobStatusSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateUserBody,
        CreateHashJobBody,
        HealthcheckResponse
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "hashjobs", description = "Operations related to hash jobs"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
