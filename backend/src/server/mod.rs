//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::io;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};

use unhash::Trace;
#[cfg(debug_assertions)]
use unhash::doc::ApiDoc;
use unhash::inbound::http::api_scope;
use unhash::inbound::http::health::{HealthState, live, ready};
use unhash::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] carrying the bind address, optional pools and cache TTL.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Resolve on SIGINT, or on SIGTERM where the platform has it.
async fn shutdown_signal() -> io::Result<()> {
    let interrupt = tokio::signal::ctrl_c();
    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())?.recv().await;
        Ok::<(), io::Error>(())
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<io::Result<()>>();

    tokio::select! {
        result = interrupt => result,
        result = terminate => result,
    }
}

/// Fail liveness probes, then stop accepting connections and drain in-flight requests.
async fn drain(handle: &ServerHandle, health_state: &HealthState) {
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}

/// Wait for a termination signal and shut the server down gracefully.
///
/// [`create_server`] disables actix's own signal handling so the liveness
/// probe can report 503 while connections drain.
pub async fn shutdown_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    if let Err(error) = shutdown_signal().await {
        warn!(%error, "failed to listen for shutdown signals; stopping now");
    }
    drain(&handle, &health_state).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use unhash::domain::TRACE_ID_HEADER;

    fn memory_deps() -> AppDependencies {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("addr"));
        let health_state = web::Data::new(HealthState::new("test"));
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_http_state(&config),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn probes_and_api_share_one_app() {
        let app = actix_test::init_service(build_app(memory_deps())).await;

        let ready_response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(ready_response.status(), StatusCode::OK);

        let health = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/healthcheck")
                .to_request(),
        )
        .await;
        assert!(health.headers().contains_key(TRACE_ID_HEADER));
        let body: Value = actix_test::read_body_json(health).await;
        assert_eq!(body["environment"], "test");
    }

    #[rstest]
    #[actix_web::test]
    async fn create_then_fetch_over_memory_adapters() {
        let app = actix_test::init_service(build_app(memory_deps())).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(json!({ "username": "ada", "email": "ada@example.com" }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let user: Value = actix_test::read_body_json(created).await;
        let id = user["id"].as_str().expect("id");

        let fetched = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/users/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(fetched.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(fetched).await;
        assert_eq!(body, user);
    }

    #[rstest]
    #[actix_web::test]
    async fn drain_fails_liveness_and_stops_the_server() {
        let health_state = web::Data::new(HealthState::new("test"));
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("addr"));
        let server = create_server(health_state.clone(), config).expect("server binds");
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        assert!(health_state.is_ready());
        assert!(health_state.is_alive());

        drain(&handle, &health_state).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }

    #[cfg(debug_assertions)]
    #[rstest]
    #[actix_web::test]
    async fn openapi_document_is_served_in_debug_builds() {
        let app = actix_test::init_service(build_app(memory_deps())).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api-docs/openapi.json")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
