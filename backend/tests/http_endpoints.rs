//! End-to-end HTTP scenarios over the in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use unhash::Trace;
use unhash::domain::{HashJobService, TRACE_ID_HEADER, UserService};
use unhash::inbound::http::api_scope;
use unhash::inbound::http::health::HealthState;
use unhash::inbound::http::state::{HttpState, HttpStatePorts};
use unhash::outbound::cache::CacheTtl;
use unhash::outbound::memory::{MemoryCache, MemoryStore};

fn memory_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(MemoryCache::new(
        CacheTtl::new(Duration::from_secs(60)),
        Arc::new(mockable::DefaultClock),
    ));
    let users = Arc::new(UserService::new(store.clone(), cache.clone()));
    let hash_jobs = Arc::new(HashJobService::new(store, cache));
    HttpState::new(HttpStatePorts {
        users: users.clone(),
        users_query: users,
        hash_jobs: hash_jobs.clone(),
        hash_jobs_query: hash_jobs,
    })
}

fn app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(memory_state()))
        .app_data(web::Data::new(HealthState::new("test")))
        .wrap(Trace)
        .service(api_scope())
}

async fn json_of(response: ServiceResponse) -> Value {
    actix_test::read_body_json(response).await
}

#[rstest]
#[actix_web::test]
async fn user_lifecycle() {
    let app = actix_test::init_service(app()).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "username": "ada", "email": "ada@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let user = json_of(created).await;
    let id = user["id"].as_str().expect("generated id").to_owned();

    let by_email = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users?email=ada@example.com")
            .to_request(),
    )
    .await;
    assert_eq!(by_email.status(), StatusCode::OK);
    assert_eq!(json_of(by_email).await, user);

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/admin/users")
            .to_request(),
    )
    .await;
    assert_eq!(json_of(listed).await, json!([user]));

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let trace_header = gone
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = json_of(gone).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["traceId"].as_str(), trace_header.as_deref());
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let app = actix_test::init_service(app()).await;
    let body = json!({ "username": "ada", "email": "ada@example.com" });

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(&body)
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "username": "lovelace", "email": "ada@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let error = json_of(second).await;
    assert_eq!(error["details"]["field"], "email");
}

#[rstest]
#[actix_web::test]
async fn hash_job_lifecycle() {
    let app = actix_test::init_service(app()).await;
    let owner = json_of(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(json!({ "username": "ada", "email": "ada@example.com" }))
                .to_request(),
        )
        .await,
    )
    .await;
    let owner_id = owner["id"].as_str().expect("owner id");

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/hashjobs")
            .set_json(json!({ "ownerId": owner_id, "hashes": ["c", "a", "b"] }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let job = json_of(created).await;
    assert_eq!(job["ownerId"], owner_id);
    assert_eq!(job["status"], "pending");
    assert_eq!(job["hashes"], json!(["c", "a", "b"]));
    let job_id = job["id"].as_str().expect("job id");

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/hashjobs/{job_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(json_of(fetched).await, job);

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/hashjobs/{job_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/hashjobs/{job_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case::unknown_owner(json!({ "ownerId": "ghost", "hashes": ["a"] }), StatusCode::NOT_FOUND)]
#[case::blank_owner(json!({ "ownerId": " ", "hashes": ["a"] }), StatusCode::BAD_REQUEST)]
#[case::malformed_body(json!({ "hashes": ["a"] }), StatusCode::BAD_REQUEST)]
#[case::unknown_owner_without_hashes(json!({ "ownerId": "ghost", "hashes": [] }), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn hash_job_creation_rejects_bad_requests(#[case] body: Value, #[case] expected: StatusCode) {
    let app = actix_test::init_service(app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/hashjobs")
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn empty_hash_list_is_invalid() {
    let app = actix_test::init_service(app()).await;
    let owner = json_of(
        actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/users")
                .set_json(json!({ "username": "ada", "email": "ada@example.com" }))
                .to_request(),
        )
        .await,
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/hashjobs")
            .set_json(json!({ "ownerId": owner["id"], "hashes": [] }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = json_of(response).await;
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["details"]["field"], "hashes");
}

#[rstest]
#[actix_web::test]
async fn malformed_body_gets_the_error_envelope() {
    let app = actix_test::init_service(app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "username": "ada" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let trace_header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let error = json_of(response).await;
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["details"]["code"], "malformed");
    assert_eq!(error["traceId"].as_str(), trace_header.as_deref());
}
