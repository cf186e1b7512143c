#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use serde_json::Value;

use cyclo_veda::middleware::request_trace::RequestTrace;
use cyclo_veda::middleware::structured_logger::StructuredLogger;
use cyclo_veda::repos::users::InMemoryUsers;
use cyclo_veda::routes;
use cyclo_veda::state::app_state::AppState;
use cyclo_veda::state::security_config::SecurityConfig;

// Logging is auto-installed for test binaries
#[ctor::ctor]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// State with the seeded development accounts (password "password").
pub fn seeded_state(security: SecurityConfig) -> AppState {
    let users = InMemoryUsers::seeded().expect("seeding the in-memory store should not fail");
    AppState::new(Arc::new(users), security)
}

/// Build an in-process service with the production middleware and routes.
pub async fn spawn_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

/// Validate that a response follows the ProblemDetails structure and that
/// trace_id in the body matches the x-request-id header. Returns the parsed
/// body for further assertions.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();
    let content_type = headers
        .get("content-type")
        .expect("error responses must have a content type")
        .to_str()
        .unwrap();
    assert_eq!(content_type, "application/problem+json");

    let request_id = headers
        .get("x-request-id")
        .expect("every response carries x-request-id")
        .to_str()
        .unwrap()
        .to_string();
    assert!(!request_id.is_empty());

    let body = test::read_body(resp).await;
    let problem: Value = serde_json::from_slice(&body).expect("body should be JSON");

    assert!(problem.get("type").is_some());
    assert!(problem.get("title").is_some());
    assert_eq!(problem["status"], expected_status);
    assert!(problem.get("detail").is_some());
    assert_eq!(problem["code"], expected_code);
    assert_eq!(
        problem["trace_id"].as_str().unwrap(),
        request_id,
        "trace_id in body should match x-request-id header"
    );

    problem
}
