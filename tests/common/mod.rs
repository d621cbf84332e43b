#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use notes_api_rust::config::{AppConfig, Environment};
use notes_api_rust::database::MemoryStore;
use notes_api_rust::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Development config with a fixed secret and the cheapest argon2 settings
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::for_environment(Environment::Development);
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.password_hash_memory_kib = 1024;
    config.security.password_hash_iterations = 1;
    config.api.enable_request_logging = false;
    config
}

/// The router over a fresh in-memory store, driven without a socket
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::with_store(test_config(), MemoryStore::new())
            .expect("test state should build");
        Self { router: app(state) }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };
        (status, body)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");
        self.send(request).await
    }

    pub async fn register(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/register",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/login",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Register then log in, returning the token
    pub async fn signed_up(&self, username: &str, password: &str) -> String {
        let (status, _) = self.register(username, password).await;
        assert_eq!(status, StatusCode::CREATED, "register {username}");
        let (status, body) = self.login(username, password).await;
        assert_eq!(status, StatusCode::OK, "login {username}");
        body["token"].as_str().expect("token in body").to_string()
    }
}

/// The real server binary on a free port with the in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_notes-api-rust"))
            .env("APP_ENV", "development")
            .env("STORAGE_BACKEND", "memory")
            .env_remove("DATABASE_URL")
            .env("NOTES_API_HOST", "127.0.0.1")
            .env("NOTES_API_PORT", port.to_string())
            .env("SECURITY_JWT_SECRET", TEST_SECRET)
            .env("SECURITY_PASSWORD_HASH_MEMORY_KIB", "1024")
            .env("SECURITY_PASSWORD_HASH_ITERATIONS", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self { port, base_url, child };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
