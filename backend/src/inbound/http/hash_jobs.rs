//! Hash job API handlers.
//!
//! ```text
//! POST /api/v1/hashjobs {"ownerId":"3fa85f64-...","hashes":["5f4dcc3b..."]}
//! GET /api/v1/hashjobs/{id}
//! DELETE /api/v1/hashjobs/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::CreateHashJobRequest;
use crate::domain::{Error, HashJob, HashJobId, HashJobValidationError, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, HashJobSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/hashjobs`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHashJobBody {
    /// Identifier of an existing user.
    pub owner_id: String,
    /// Hashes to process, in submission order.
    pub hashes: Vec<String>,
}

fn map_hash_job_validation_error(err: HashJobValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": "invalid" }))
}

/// Submit a batch of hashes on behalf of an existing user.
///
/// An empty hash list is rejected before any lookup. The owner is then
/// resolved through the user service, so an unknown `ownerId` yields 404 and
/// no job is stored.
#[utoipa::path(
    post,
    path = "/api/v1/hashjobs",
    request_body = CreateHashJobBody,
    responses(
        (status = 201, description = "Hash job created", body = HashJobSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Owner not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["hashjobs"],
    operation_id = "createHashJob"
)]
#[post("/hashjobs")]
pub async fn create_hash_job(
    state: web::Data<HttpState>,
    payload: web::Json<CreateHashJobBody>,
) -> ApiResult<HttpResponse> {
    let CreateHashJobBody { owner_id, hashes } = payload.into_inner();
    if hashes.is_empty() {
        return Err(map_hash_job_validation_error(HashJobValidationError::EmptyHashes));
    }
    let owner_id = UserId::new(owner_id)
        .map_err(|_| map_hash_job_validation_error(HashJobValidationError::EmptyOwnerId))?;
    let owner = state.users_query.get_user(&owner_id).await?;
    let job = state
        .hash_jobs
        .create_hash_job(CreateHashJobRequest {
            hashes,
            owner: Some(owner),
        })
        .await?;
    Ok(HttpResponse::Created().json(job))
}

/// Fetch a hash job by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/hashjobs/{id}",
    params(("id" = String, Path, description = "Hash job identifier")),
    responses(
        (status = 200, description = "Hash job", body = HashJobSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["hashjobs"],
    operation_id = "getHashJob"
)]
#[get("/hashjobs/{id}")]
pub async fn get_hash_job(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<HashJob>> {
    let id = HashJobId::new(path.into_inner()).map_err(map_hash_job_validation_error)?;
    let job = state.hash_jobs_query.get_hash_job(&id).await?;
    Ok(web::Json(job))
}

/// Delete a hash job by identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/hashjobs/{id}",
    params(("id" = String, Path, description = "Hash job identifier")),
    responses(
        (status = 204, description = "Hash job deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["hashjobs"],
    operation_id = "deleteHashJob"
)]
#[delete("/hashjobs/{id}")]
pub async fn delete_hash_job(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = HashJobId::new(path.into_inner()).map_err(map_hash_job_validation_error)?;
    state.hash_jobs.delete_hash_job(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
