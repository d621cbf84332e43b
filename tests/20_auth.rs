mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn register_then_login_returns_token() {
    let app = TestApp::new();

    let (status, body) = app.register("alice", "pw1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");

    let (status, body) = app.login("alice", "pw1").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    assert!(!token.is_empty());

    // the token opens protected routes
    let (status, _) = app.request(Method::GET, "/notes", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_username_rejected() {
    let app = TestApp::new();
    app.register("alice", "pw1").await;

    let (status, body) = app.register("alice", "other").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "User already exists");

    // the first password still works
    let (status, _) = app.login("alice", "pw1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_rejected_after_successful_login() {
    let app = TestApp::new();
    app.signed_up("alice", "pw1").await;

    let (status, body) = app.login("alice", "nope").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid credentials");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn unknown_user_rejected() {
    let app = TestApp::new();

    let (status, body) = app.login("ghost", "pw").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn missing_fields_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .request(Method::POST, "/register", None, Some(json!({ "username": "alice" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = app
        .request(Method::POST, "/login", None, Some(json!({ "password": "pw" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_username_rejected_on_register() {
    let app = TestApp::new();

    let (status, body) = app.register("a b", "pw").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["username"].is_string());
}

#[tokio::test]
async fn invalid_json_rejected() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
}
