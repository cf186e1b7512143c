mod common;

use actix_web::{test, web, App, HttpResponse};
use cyclo_veda::middleware::request_trace::RequestTrace;
use cyclo_veda::AppError;

async fn bad_request_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::bad_request(
        "INVALID_EXAMPLE",
        "Example failure".to_string(),
    ))
}

async fn unauthorized_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::unauthorized())
}

#[actix_web::test]
async fn error_responses_follow_problem_details() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/error", web::get().to(bad_request_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/_test/error").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);

    let headers = resp.headers().clone();
    let request_id = headers
        .get("x-request-id")
        .expect("x-request-id header present")
        .to_str()
        .unwrap()
        .to_string();
    assert!(!request_id.is_empty());

    let content_type = headers.get("content-type").unwrap().to_str().unwrap();
    assert_eq!(content_type, "application/problem+json");

    let body = test::read_body(resp).await;
    let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(problem.get("type").is_some());
    assert!(problem.get("title").is_some());
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["detail"], "Example failure");
    assert_eq!(problem["code"], "INVALID_EXAMPLE");

    // trace_id in the body matches the response header.
    assert_eq!(problem["trace_id"].as_str().unwrap(), request_id);
}

#[actix_web::test]
async fn unauthorized_responses_carry_www_authenticate() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/unauthorized", web::get().to(unauthorized_handler)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/_test/unauthorized")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
    assert_eq!(
        resp.headers()
            .get("WWW-Authenticate")
            .expect("401s advertise the Bearer scheme")
            .to_str()
            .unwrap(),
        "Bearer"
    );

    let body = test::read_body(resp).await;
    let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem["code"], "UNAUTHORIZED");
    assert_eq!(problem["detail"], "Could not validate credentials");
}

#[actix_web::test]
async fn trace_ids_differ_per_request() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/error", web::get().to(bad_request_handler)),
    )
    .await;

    let first = test::call_service(
        &app,
        test::TestRequest::get().uri("/_test/error").to_request(),
    )
    .await;
    let second = test::call_service(
        &app,
        test::TestRequest::get().uri("/_test/error").to_request(),
    )
    .await;

    let a = first.headers().get("x-request-id").unwrap().clone();
    let b = second.headers().get("x-request-id").unwrap().clone();
    assert_ne!(a, b);
}
