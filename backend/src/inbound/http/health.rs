//! Health endpoints: liveness & readiness probes for orchestration and load balancers,
//! plus the `/api/v1/healthcheck` status document.
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shared health state for readiness and liveness checks.
/// Track readiness and whether the process should report itself as alive to orchestrators.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    environment: String,
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new("development")
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            environment: environment.into(),
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness probes emit 503 to trigger restarts.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Deployment environment reported by `/api/v1/healthcheck`.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Body of `GET /api/v1/healthcheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthcheckResponse {
    #[schema(example = "available")]
    pub status: String,
    #[schema(example = "development")]
    pub environment: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Readiness probe. Return 200 when dependencies are initialised and the server can handle traffic; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
/// The shutdown path calls `HealthState::mark_unhealthy` before draining connections.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (
            status = 503,
            description = "Server is shutting down"
        )
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

/// Report service status, environment and build version.
#[utoipa::path(
    get,
    path = "/api/v1/healthcheck",
    tags = ["health"],
    responses(
        (status = 200, description = "Service status", body = HealthcheckResponse)
    )
)]
#[get("/healthcheck")]
pub async fn healthcheck(state: web::Data<HealthState>) -> web::Json<HealthcheckResponse> {
    web::Json(HealthcheckResponse {
        status: "available".to_owned(),
        environment: state.environment().to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}
