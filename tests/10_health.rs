mod common;

use axum::http::{Method, StatusCode};

#[tokio::test]
async fn health_reports_store_ok() {
    let app = common::TestApp::new();

    let (status, body) = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn root_describes_service() {
    let app = common::TestApp::new();

    let (status, body) = app.request(Method::GET, "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["endpoints"]["notes"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = common::TestApp::new();

    let (status, _) = app.request(Method::GET, "/nope", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
