//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod hash_jobs;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// Build the `/api/v1` scope with every REST handler registered.
///
/// Handlers expect [`state::HttpState`] and [`health::HealthState`] as app
/// data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use unhash::inbound::http::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user_by_email)
        .service(users::get_user)
        .service(users::delete_user)
        .service(hash_jobs::create_hash_job)
        .service(hash_jobs::get_hash_job)
        .service(hash_jobs::delete_hash_job)
        .service(health::healthcheck)
}
