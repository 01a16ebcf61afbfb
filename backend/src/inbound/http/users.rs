//! Users API handlers.
//!
//! ```text
//! POST /api/v1/users {"username":"ada","email":"ada@example.com"}
//! GET /api/v1/users/{id}
//! GET /api/v1/users?email=ada@example.com
//! DELETE /api/v1/users/{id}
//! GET /api/v1/admin/users
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::CreateUserRequest;
use crate::domain::{Email, Error, User, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/users`.
///
/// Example JSON:
/// `{"username":"ada","email":"ada@example.com"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    pub username: String,
    pub email: String,
}

/// Query string for `GET /api/v1/users`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct UserLookupQuery {
    /// Email address to look up.
    pub email: Option<String>,
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": "invalid" }))
}

/// Register a new user.
///
/// The identifier is generated server-side.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username or email already taken", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let CreateUserBody { username, email } = payload.into_inner();
    let user = state
        .users
        .create_user(CreateUserRequest {
            id: UserId::random().to_string(),
            username,
            email,
        })
        .await?;
    Ok(HttpResponse::Created().json(user))
}

/// Fetch a user by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner()).map_err(map_user_validation_error)?;
    let user = state.users_query.get_user(&id).await?;
    Ok(web::Json(user))
}

/// Fetch a user by email address.
///
/// `email` is required; the collection itself is listed under
/// `/api/v1/admin/users`.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserLookupQuery),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Missing or blank email", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserByEmail"
)]
#[get("/users")]
pub async fn get_user_by_email(
    state: web::Data<HttpState>,
    query: web::Query<UserLookupQuery>,
) -> ApiResult<web::Json<User>> {
    let raw = query.into_inner().email.ok_or_else(|| {
        Error::invalid_request("email query parameter is required")
            .with_details(json!({ "field": "email", "code": "missing" }))
    })?;
    let email = Email::new(raw).map_err(map_user_validation_error)?;
    let user = state.users_query.get_user_by_email(&email).await?;
    Ok(web::Json(user))
}

/// Delete a user by identifier.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner()).map_err(map_user_validation_error)?;
    state.users.delete_user(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List every stored user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use unhash::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/admin/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}
