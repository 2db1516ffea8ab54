mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{seeded_repo, state_with};
use serde_json::{json, Value};
use users_api::test_support::{create_test_app_builder, InMemoryUserRepo};

#[actix_web::test]
async fn test_health_endpoint() {
    let repo = seeded_repo();
    let app = create_test_app_builder(state_with(&repo)).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-trace-id"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "healthy"}));
    assert_eq!(repo.calls(), 1);
}

#[actix_web::test]
async fn test_health_ignores_authorization_header() {
    let repo = seeded_repo();
    let app = create_test_app_builder(state_with(&repo)).build().await;

    for value in ["Bearer not-a-token", "Basic Zm9vOmJhcg==", ""] {
        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header(("Authorization", value))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "header {value:?}");
    }
}

#[actix_web::test]
async fn test_health_reports_unavailable_store() {
    let repo = Arc::new(InMemoryUserRepo::unavailable());
    let app = create_test_app_builder(state_with(&repo)).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"status": "unhealthy", "error": "Database connection failed"})
    );
}
