#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use marquee_api::auth::jwt::JwtConfig;
use marquee_api::config::ServerConfig;
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_db::{MemoryUserStore, UserStore};
use tower::ServiceExt;

pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        frontend_url: FRONTEND_ORIGIN.to_string(),
        request_timeout_secs: 30,
        cookie_secure: false,
        min_password_length: 6,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            session_ttl_secs: 3600,
        },
    }
}

/// Build the full application router over the given store.
pub fn build_test_app(users: Arc<dyn UserStore>) -> Router {
    let config = test_config();
    let state = AppState {
        users,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Router over a fresh in-memory store.
pub fn fresh_app() -> Router {
    build_test_app(Arc::new(MemoryUserStore::new()))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The raw `Set-Cookie` header for the session cookie, if any.
pub fn set_cookie_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .map(ToString::to_string)
}

/// `name=value` pair suitable for a `Cookie` request header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

pub async fn register(app: &Router, full_name: &str, email: &str, password: &str) -> Response<Body> {
    post_json(
        app,
        "/api/v1/user/register",
        serde_json::json!({ "fullName": full_name, "email": email, "password": password }),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> Response<Body> {
    post_json(
        app,
        "/api/v1/user/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await
}
