#![allow(dead_code)]

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use catalog_api::config::DEFAULT_BODY_LIMIT_BYTES;
use catalog_api::{app, AppState, PasswordHasher, TokenService};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub const SECRET: &str = "integration-secret";

pub fn tokens() -> TokenService {
    TokenService::new(SECRET, Duration::from_secs(300))
}

pub fn build_app() -> Router {
    let state = AppState::in_memory(tokens(), PasswordHasher::new(4));
    app(state, DEFAULT_BODY_LIMIT_BYTES)
}

pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    let resp = app.clone().oneshot(req).await.expect("request should be handled");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body should read");
    let json = serde_json::from_slice::<Value>(&bytes).expect("body should be json");
    (status, json)
}

pub fn assert_envelope(body: &Value, code: u16, message: &str) {
    assert_eq!(body["code"], code, "unexpected envelope: {body}");
    assert_eq!(body["message"], message, "unexpected envelope: {body}");
}

/// Signs up a user and returns its id.
pub async fn signup(app: &Router, name: &str, password: &str) -> i64 {
    let (status, body) = request_json(
        app,
        "POST",
        "/users",
        None,
        Some(json!({"name": name, "email": format!("{name}@example.com"), "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"][0]["id"].as_i64().expect("id should be present")
}

pub async fn login(app: &Router, name: &str, password: &str) -> String {
    let (status, body) = request_json(
        app,
        "POST",
        "/login",
        None,
        Some(json!({"name": name, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"].as_str().expect("token should be a string").to_string()
}
