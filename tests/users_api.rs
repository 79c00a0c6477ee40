mod common;

use axum::http::StatusCode;
use common::{assert_envelope, build_app, login, request_json, signup, tokens};
use serde_json::json;

#[tokio::test]
async fn signup_login_and_read_back() {
    let app = build_app();

    let (status, body) = request_json(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({"name": "a", "email": "e", "password": "p"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, 200, "create user success");
    let id = body["data"][0]["id"].as_i64().unwrap();
    assert_ne!(id, 0);
    assert_eq!(body["data"], json!([{"id": id, "name": "a", "email": "e", "password": "p"}]));

    let token = login(&app, "a", "p").await;
    assert!(!token.is_empty());
    assert_eq!(tokens().verify(&token).unwrap().user_id, id);

    let (status, body) = request_json(&app, "GET", &format!("/users/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, 200, "get user success");
    assert_eq!(body["data"], json!([{"id": id, "name": "a", "email": "e"}]));
}

#[tokio::test]
async fn empty_directory_is_not_an_error() {
    let app = build_app();
    let token = tokens().issue(1, "nobody").unwrap();
    let (status, body) = request_json(&app, "GET", "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, 200, "users directory empty");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn list_requires_token() {
    let app = build_app();
    let (status, body) = request_json(&app, "GET", "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_envelope(&body, 401, "unauthorized");
}

#[tokio::test]
async fn update_and_delete_missing_user_are_400() {
    let app = build_app();
    let id = signup(&app, "a", "p").await;
    let token = login(&app, "a", "p").await;

    let (status, body) = request_json(
        &app,
        "PUT",
        "/users/999",
        Some(&token),
        Some(json!({"name": "x", "email": "y", "password": "z"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, 400, "user does not exist");

    let (status, body) = request_json(&app, "DELETE", "/users/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, 400, "user does not exist");

    let (_, body) = request_json(&app, "GET", &format!("/users/{id}"), Some(&token), None).await;
    assert_eq!(body["data"][0]["name"], "a");
}

#[tokio::test]
async fn update_changes_credentials() {
    let app = build_app();
    let id = signup(&app, "a", "p").await;
    let token = login(&app, "a", "p").await;

    let (status, body) = request_json(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(&token),
        Some(json!({"name": "b", "email": "b@x", "password": "q"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, 200, "update user success");
    assert_eq!(body["data"], json!([{"id": id, "name": "b", "email": "b@x", "password": "q"}]));

    login(&app, "b", "q").await;
}

#[tokio::test]
async fn delete_user_then_get_is_400() {
    let app = build_app();
    let id = signup(&app, "a", "p").await;
    let token = login(&app, "a", "p").await;

    let (status, body) = request_json(&app, "DELETE", &format!("/users/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, 200, "delete user success");
    assert!(body["data"].is_null());

    let (status, body) = request_json(&app, "GET", &format!("/users/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, 400, "user does not exist");
}
