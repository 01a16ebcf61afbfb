//! HTTP adapter mapping for domain errors.
//!
//! Handlers return [`ApiResult`]; a domain [`Error`] becomes a JSON envelope
//! with a status derived from its code. Internal errors are logged in full
//! and redacted before they leave the process, keeping only the trace
//! identifier. A store outage (503) tells clients when to retry, and request
//! bodies that fail to deserialise get the same envelope as every other
//! rejection.

use actix_web::error::JsonPayloadError;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Seconds a client should wait before retrying after a store outage.
pub const STORE_RETRY_AFTER_SECS: u32 = 5;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        match self.code() {
            ErrorCode::ServiceUnavailable => {
                builder.insert_header((header::RETRY_AFTER, STORE_RETRY_AFTER_SECS));
            }
            ErrorCode::InternalError => {
                error!(
                    trace_id = self.trace_id().unwrap_or_default(),
                    detail = self.message(),
                    "internal error redacted from response"
                );
            }
            _ => {}
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// `JsonConfig` error handler turning body deserialisation failures into an
/// `invalid_request` envelope.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use unhash::inbound::http::error::json_error_handler;
///
/// let _config = web::JsonConfig::default().error_handler(json_error_handler);
/// ```
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("malformed request body: {err}"))
        .with_details(json!({ "field": "body", "code": "malformed" }))
        .into()
}
