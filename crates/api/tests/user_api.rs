//! HTTP-level integration tests for the `/api/v1/user` endpoints.
//!
//! Tests cover registration, login, logout, the profile endpoint, CORS, and
//! the uniform failure body. They run against the in-memory user store.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{
    body_json, build_test_app, cookie_pair, fresh_app, get, get_with_cookie, login, post_json,
    register, send, set_cookie_header, FRONTEND_ORIGIN,
};
use marquee_db::{MemoryUserStore, UserStore};

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_register_then_duplicate() {
    let app = fresh_app();

    let response = register(&app, "A B", "a@b.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(set_cookie_header(&response).is_none(), "register must not log in");
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Account created successfully.");

    let response = register(&app, "A B", "a@b.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn test_duplicate_detection_ignores_email_case() {
    let app = fresh_app();
    register(&app, "A B", "a@b.com", "secret1").await;

    let response = register(&app, "A B", " A@B.COM ", "secret1").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_stores_hash_not_plaintext() {
    let store = Arc::new(MemoryUserStore::new());
    let app = build_test_app(store.clone());

    register(&app, "A B", "a@b.com", "secret1").await;

    let user = store.find_by_email("a@b.com").await.unwrap().unwrap();
    assert_ne!(user.password_hash, "secret1");
    assert!(user.password_hash.starts_with("$argon2id$"));
    assert_eq!(user.full_name, "A B");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = fresh_app();

    let response = post_json(
        &app,
        "/api/v1/user/register",
        serde_json::json!({ "email": "a@b.com", "password": "secret1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Full name is required");
}

#[tokio::test]
async fn test_register_short_password() {
    let app = fresh_app();

    let response = register(&app, "A B", "a@b.com", "abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_uses_failure_body() {
    let app = fresh_app();

    let request = Request::post("/api/v1/user/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_login_wrong_password_then_success() {
    let app = fresh_app();
    register(&app, "A B", "a@b.com", "secret1").await;

    let response = login(&app, "a@b.com", "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie_header(&response).is_none());
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid email or password");

    let response = login(&app, "a@b.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie_header(&response).expect("login must set the session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=3600"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Welcome back A B");
    assert_eq!(json["user"]["fullName"], "A B");
    assert_eq!(json["user"]["email"], "a@b.com");
    assert_eq!(json["expiresIn"], 3600);
    assert!(json["user"].get("password").is_none());
    assert!(json["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let app = fresh_app();

    let response = login(&app, "ghost@b.com", "whatever").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_missing_password() {
    let app = fresh_app();

    let response = post_json(
        &app,
        "/api/v1/user/login",
        serde_json::json!({ "email": "a@b.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_logins_issue_independent_tokens() {
    let app = fresh_app();
    register(&app, "A B", "a@b.com", "secret1").await;

    let (first, second) = tokio::join!(
        login(&app, "a@b.com", "secret1"),
        login(&app, "a@b.com", "secret1")
    );

    let first = set_cookie_header(&first).unwrap();
    let second = set_cookie_header(&second).unwrap();
    assert_ne!(cookie_pair(&first), cookie_pair(&second));
}

// ---------------------------------------------------------------------------
// Profile & logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_me_requires_cookie() {
    let app = fresh_app();

    let response = get(&app, "/api/v1/user/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_with_session_cookie() {
    let app = fresh_app();
    register(&app, "A B", "a@b.com", "secret1").await;
    let response = login(&app, "a@b.com", "secret1").await;
    let cookie = cookie_pair(&set_cookie_header(&response).unwrap());

    let response = get_with_cookie(&app, "/api/v1/user/me", &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "a@b.com");
}

#[tokio::test]
async fn test_me_rejects_forged_token() {
    let app = fresh_app();

    let response = get_with_cookie(&app, "/api/v1/user/me", "token=forged.jwt.value").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_is_idempotent() {
    let app = fresh_app();

    for _ in 0..2 {
        let response = get(&app, "/api/v1/user/logout").await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie_header(&response).expect("logout must clear the cookie");
        assert!(cookie.contains("Max-Age=0"));

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User logged out successfully.");
    }
}

#[tokio::test]
async fn test_logout_after_login_clears_cookie() {
    let app = fresh_app();
    register(&app, "A B", "a@b.com", "secret1").await;
    let response = login(&app, "a@b.com", "secret1").await;
    let cookie = cookie_pair(&set_cookie_header(&response).unwrap());

    let response = get_with_cookie(&app, "/api/v1/user/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = set_cookie_header(&response).unwrap();
    assert_eq!(cookie_pair(&cleared), "token=");

    // A client honoring the cleared cookie sends nothing and is unauthenticated.
    let response = get(&app, "/api/v1/user/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Middleware
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let app = fresh_app();

    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_unknown_path_returns_failure_body() {
    let app = fresh_app();

    let response = get(&app, "/api/v1/user/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Resource not found");
}

#[tokio::test]
async fn test_wrong_method_returns_failure_body() {
    let app = fresh_app();

    let response = post_json(&app, "/api/v1/user/logout", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn test_cors_preflight_allows_frontend_with_credentials() {
    let app = fresh_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/user/login")
        .header(header::ORIGIN, FRONTEND_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        FRONTEND_ORIGIN
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_rejects_other_origins() {
    let app = fresh_app();

    let request = Request::get("/health")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = fresh_app();

    let response = get(&app, "/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}
