//! Status tags and HTTP codes for rejected requests

mod common;

use actix_web::test;
use ak_api::create_app;
use chrono::Duration;
use serde_json::{json, Value};

use common::{status_of, TestContext, EMAIL};

#[actix_web::test]
async fn test_malformed_body_is_invalid_request_body() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "INVALID_REQUEST_BODY");
}

#[actix_web::test]
async fn test_invalid_email_is_rejected_without_side_effects() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "INVALID_EMAIL_FORMAT");
    assert_eq!(ctx.users.count().await, 0);
    assert_eq!(ctx.email.sent_count(), 0);
}

#[actix_web::test]
async fn test_duplicate_registration_conflicts() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for expected in [200, 409] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "email": EMAIL }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
        if expected == 409 {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(status_of(&body), "USER_ALREADY_EXISTS");
        }
    }
}

#[actix_web::test]
async fn test_email_failure_is_reported() {
    let ctx = TestContext::new();
    ctx.email.set_should_fail(true);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "EMAIL_SEND_FAILED");
}

#[actix_web::test]
async fn test_code_format_and_unknown_user() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": EMAIL, "code": "12a4" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "INVALID_CODE_FORMAT");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": EMAIL, "code": "1234" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "USER_NOT_FOUND");
}

#[actix_web::test]
async fn test_wrong_codes_throttle_until_cooldown() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": EMAIL }))
        .to_request();
    test::call_service(&app, req).await;
    let wrong = ctx.wrong_code_for(EMAIL);

    for remaining in (0..5).rev() {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/verify-code")
            .set_json(json!({ "email": EMAIL, "code": wrong }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(status_of(&body), "INVALID_CODE");
        assert_eq!(body["details"]["remaining_attempts"], remaining);
    }

    // Even the right code is refused inside the window
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": EMAIL, "code": ctx.code_for(EMAIL) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 429);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "TOO_MANY_ATTEMPTS");
    assert_eq!(body["details"]["retry_after_seconds"], 15 * 60);

    ctx.clock.advance(Duration::minutes(15));

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": EMAIL, "code": ctx.code_for(EMAIL) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_password_login_failures() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-login")
        .set_json(json!({ "email": EMAIL, "password": "whatever-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "INVALID_CREDENTIALS");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": EMAIL }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password-login")
        .set_json(json!({ "email": EMAIL, "password": "whatever-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "EMAIL_VERIFICATION_REQUIRED");
}

#[actix_web::test]
async fn test_refresh_and_logout_with_unknown_tokens() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": "garbage" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "INVALID_TOKEN");

    // A validly signed token with no stored record
    let token_service = ctx.state.auth_service.token_service();
    let orphan = token_service
        .issue_refresh_token(&uuid::Uuid::new_v4().to_string())
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": orphan.token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "REFRESH_TOKEN_NOT_FOUND");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .set_json(json!({ "refresh_token": orphan.token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "REFRESH_TOKEN_NOT_FOUND");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status_of(&body), "NOT_FOUND");
}
