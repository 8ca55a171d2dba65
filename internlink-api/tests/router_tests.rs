/// Router-level tests that never touch the database
///
/// These exercise the paths that resolve before any query runs: the health
/// endpoint, the session middleware, role enforcement, and the ordered input
/// validation in the auth and posting handlers. The backing pool is lazy and
/// points at an unreachable address, so any test that accidentally reached
/// the database would fail loudly.
mod common;

use axum::http::{header, Method, StatusCode};
use common::TestContext;
use internlink_shared::models::account::Role;
use serde_json::json;
use tower::Service as _;
use uuid::Uuid;

#[tokio::test]
async fn test_health_is_public() {
    let ctx = TestContext::new_lazy();

    let response = ctx
        .app
        .clone()
        .call(common::get_request(Method::GET, "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let ctx = TestContext::new_lazy();

    for uri in [
        "/api/me",
        "/api/student-profile",
        "/api/company-profile",
        "/api/internships/search",
        "/api/internships",
        "/api/applications/student",
        "/api/applications/company",
    ] {
        let response = ctx
            .app
            .clone()
            .call(common::get_request(Method::GET, uri, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        let body = common::body_json(response).await;
        assert_eq!(body["error"], "unauthenticated", "{}", uri);
    }
}

#[tokio::test]
async fn test_stale_session_token_is_rejected() {
    let ctx = TestContext::new_lazy();

    let response = ctx
        .app
        .clone()
        .call(common::get_request(
            Method::GET,
            "/api/internships/search",
            Some("sid=nosuchsession"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let ctx = TestContext::new_lazy();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::POST,
            "/api/signup",
            None,
            json!({ "email": "a@b.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "missing_fields");
}

#[tokio::test]
async fn test_signup_rejects_weak_password() {
    let ctx = TestContext::new_lazy();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::POST,
            "/api/signup",
            None,
            json!({
                "full_name": "Test Student",
                "email": "student@example.com",
                "password": "weakpass",
                "retype_password": "weakpass",
                "user_type": "student",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "invalid_password");
}

#[tokio::test]
async fn test_signup_rejects_password_mismatch() {
    let ctx = TestContext::new_lazy();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::POST,
            "/api/signup",
            None,
            json!({
                "full_name": "Test Student",
                "email": "student@example.com",
                "password": "Str0ng!pass",
                "retype_password": "Str0ng!pass2",
                "user_type": "student",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "password_mismatch");
}

#[tokio::test]
async fn test_signup_rejects_unknown_user_type() {
    let ctx = TestContext::new_lazy();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::POST,
            "/api/signup",
            None,
            json!({
                "full_name": "Test Student",
                "email": "student@example.com",
                "password": "Str0ng!pass",
                "retype_password": "Str0ng!pass",
                "user_type": "admin",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "invalid_user_type");
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let ctx = TestContext::new_lazy();

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::POST,
            "/api/login",
            None,
            json!({
                "email": "not-an-email",
                "password": "secret1",
                "user_type": "student",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "invalid_email");
}

#[tokio::test]
async fn test_logout_without_session_clears_cookie() {
    let ctx = TestContext::new_lazy();

    let response = ctx
        .app
        .clone()
        .call(common::get_request(Method::GET, "/api/logout", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_student_cannot_use_company_routes() {
    let ctx = TestContext::new_lazy();
    let cookie = ctx.seed_session(Role::Student).await;

    for (method, uri) in [
        (Method::GET, "/api/company-profile"),
        (Method::GET, "/api/internships"),
        (Method::GET, "/api/applications/company"),
    ] {
        let response = ctx
            .app
            .clone()
            .call(common::get_request(method, uri, Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
        let body = common::body_json(response).await;
        assert_eq!(body["error"], "forbidden", "{}", uri);
    }
}

#[tokio::test]
async fn test_company_cannot_use_student_routes() {
    let ctx = TestContext::new_lazy();
    let cookie = ctx.seed_session(Role::Company).await;

    for uri in ["/api/student-profile", "/api/applications/student"] {
        let response = ctx
            .app
            .clone()
            .call(common::get_request(Method::GET, uri, Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
    }

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::POST,
            "/api/applications",
            Some(&cookie),
            json!({ "posting_id": Uuid::new_v4() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_posting_requires_all_fields() {
    let ctx = TestContext::new_lazy();
    let cookie = ctx.seed_session(Role::Company).await;

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::POST,
            "/api/internships",
            Some(&cookie),
            json!({ "title": "Backend Intern" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "missing_fields");
    assert_eq!(body["message"], "All fields are required for internship posting");
}

#[tokio::test]
async fn test_apply_requires_posting_id() {
    let ctx = TestContext::new_lazy();
    let cookie = ctx.seed_session(Role::Student).await;

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::POST,
            "/api/applications",
            Some(&cookie),
            json!({ "cover_letter": "Please hire me" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "missing_fields");
    assert_eq!(body["message"], "Internship ID is required");
}

#[tokio::test]
async fn test_set_status_rejects_unknown_status() {
    let ctx = TestContext::new_lazy();
    let cookie = ctx.seed_session(Role::Company).await;

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::PUT,
            &format!("/api/applications/{}/status", Uuid::new_v4()),
            Some(&cookie),
            json!({ "status": "hired" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "invalid_status");
}

#[tokio::test]
async fn test_profile_update_requires_name_and_email() {
    let ctx = TestContext::new_lazy();
    let cookie = ctx.seed_session(Role::Student).await;

    let response = ctx
        .app
        .clone()
        .call(common::json_request(
            Method::PUT,
            "/api/student-profile",
            Some(&cookie),
            json!({ "university": "MIT" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "missing_fields");
}
