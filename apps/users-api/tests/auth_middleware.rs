mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend_test_support::problem_details::assert_problem_details;
use common::{seeded_repo, state_with};
use jsonwebtoken::Algorithm;
use serde_json::json;
use users_api::test_support::{
    create_test_app_builder, expired_token_for, mint_token_with, test_security, token_for,
    TEST_JWT_SECRET,
};

#[actix_web::test]
async fn test_missing_header_is_rejected_before_storage() {
    let repo = seeded_repo();
    let app = create_test_app_builder(state_with(&repo)).build().await;

    let req = test::TestRequest::get().uri("/users/admin").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, "UNAUTHORIZED_MISSING_BEARER", StatusCode::UNAUTHORIZED).await;
    assert_eq!(repo.calls(), 0);
}

#[actix_web::test]
async fn test_malformed_headers_are_missing_credentials() {
    let repo = seeded_repo();
    let app = create_test_app_builder(state_with(&repo)).build().await;
    let token = token_for("admin", &test_security());

    for value in [
        format!("Basic {token}"),
        format!("bearer {token}"),
        "Bearer".to_string(),
        format!("Bearer {token} trailing"),
        token.clone(),
    ] {
        let req = test::TestRequest::get()
            .uri("/users/admin")
            .insert_header(("Authorization", value))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_problem_details(resp, "UNAUTHORIZED_MISSING_BEARER", StatusCode::UNAUTHORIZED)
            .await;
    }

    assert_eq!(repo.calls(), 0);
}

#[actix_web::test]
async fn test_unverifiable_tokens_are_invalid_credentials() {
    let repo = seeded_repo();
    let security = test_security();
    let app = create_test_app_builder(state_with(&repo)).build().await;

    let forged = mint_token_with(
        Algorithm::HS256,
        &json!({"username": "admin"}),
        b"some-other-secret",
    );
    let expired = expired_token_for("admin", &security);

    for token in [forged, expired, "not.a.jwt".to_string(), "garbage".to_string()] {
        let req = test::TestRequest::get()
            .uri("/users/admin")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let problem =
            assert_problem_details(resp, "UNAUTHORIZED_INVALID_JWT", StatusCode::UNAUTHORIZED)
                .await;
        // The failure kind is logged, not returned
        assert_eq!(problem.detail, "Invalid JWT");
    }

    assert_eq!(repo.calls(), 0);
}

#[actix_web::test]
async fn test_list_endpoint_requires_authentication() {
    let repo = seeded_repo();
    let app = create_test_app_builder(state_with(&repo)).build().await;

    let req = test::TestRequest::get().uri("/users/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, "UNAUTHORIZED_MISSING_BEARER", StatusCode::UNAUTHORIZED).await;
    assert_eq!(repo.calls(), 0);
}

#[actix_web::test]
async fn test_rejection_carries_bearer_challenge() {
    let repo = seeded_repo();
    let app = create_test_app_builder(state_with(&repo)).build().await;

    let req = test::TestRequest::get().uri("/users/admin").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("www-authenticate").unwrap(), "Bearer");
}

#[actix_web::test]
async fn test_handler_sees_verified_claims() {
    let repo = seeded_repo();
    let app = create_test_app_builder(state_with(&repo))
        .with_routes(|cfg| {
            cfg.route(
                "/whoami",
                web::get().to(|claims: users_api::CurrentClaims| async move {
                    HttpResponse::Ok().body(claims.username.clone())
                }),
            );
        })
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token_for("JohnD", &test_security()))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "JohnD");
}

#[actix_web::test]
async fn test_hmac_variants_share_the_secret() {
    let repo = seeded_repo();
    let app = create_test_app_builder(state_with(&repo)).build().await;

    for alg in [Algorithm::HS384, Algorithm::HS512] {
        let token = mint_token_with(alg, &json!({"username": "admin"}), TEST_JWT_SECRET.as_bytes());
        let req = test::TestRequest::get()
            .uri("/users/admin")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "{alg:?}");
    }
}
