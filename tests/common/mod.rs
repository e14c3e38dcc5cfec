//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the full router (error pages included) in-process.
//! Advice requests go nowhere unless a test points the AI config at a stub
//! server started with [`spawn_stub`].

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use spendcoach::config::{AiConfig, Config};
use spendcoach::server;
use spendcoach::state::AppState;
use std::time::Duration;
use tower::ServiceExt;

pub const BOUNDARY: &str = "----spendcoach-test-boundary";

/// Nothing listens on port 1, so connections are refused immediately.
pub const UNREACHABLE_AI: &str = "http://127.0.0.1:1";

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// A client whose AI provider is unreachable.
    pub fn new() -> Self {
        Self::with_ai(AiConfig {
            base_url: UNREACHABLE_AI.into(),
            timeout: Duration::from_secs(5),
            ..AiConfig::default()
        })
    }

    pub fn with_ai(ai: AiConfig) -> Self {
        let config = Config {
            ai,
            ..Config::default()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(config).expect("Failed to build state");
        Self { state }
    }

    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with form data and return status and body.
    pub async fn post_form(&self, uri: &str, form_data: &[(&str, &str)]) -> (StatusCode, String) {
        self.send(form_request(uri, form_data, false)).await
    }

    /// Same as [`post_form`](Self::post_form) but flagged as an HTMX request.
    pub async fn post_form_htmx(
        &self,
        uri: &str,
        form_data: &[(&str, &str)],
    ) -> (StatusCode, String) {
        self.send(form_request(uri, form_data, true)).await
    }

    /// Upload a CSV as the `file` field of a multipart form.
    pub async fn upload_csv(&self, uri: &str, content: &[u8]) -> (StatusCode, String) {
        self.upload_field(uri, "file", "spending.csv", content).await
    }

    pub async fn upload_field(
        &self,
        uri: &str,
        field: &str,
        file_name: &str,
        content: &[u8],
    ) -> (StatusCode, String) {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn form_request(uri: &str, form_data: &[(&str, &str)], htmx: bool) -> Request<Body> {
    let body = form_data
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    builder.body(Body::from(body)).unwrap()
}

/// Start a stub AI provider on an OS-assigned port and return its base URL.
pub async fn spawn_stub(app: Router) -> String {
    let (port, _handle) = server::serve(app, "127.0.0.1", 0)
        .await
        .expect("Failed to start stub server");
    format!("http://127.0.0.1:{}", port)
}
