//! Integration tests for the MXroute Alias Gateway API.
//!
//! These tests spin up a fake MXroute provider and a real gateway instance wired
//! to it, then make HTTP requests to verify the complete request/response cycle.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, OnceLock};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response as AxumResponse};
use axum::{Json, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use regex::Regex;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use mxroute_alias_gateway::api::{AppState, create_router};
use mxroute_alias_gateway::config::{
    AppConfig, AuthConfig, ObservabilityConfig, ServerConfig, UpstreamConfig,
};
use mxroute_alias_gateway::upstream::create_provider;

const API_TOKEN: &str = "test-token";

// ============================================================================
// Fake Provider
// ============================================================================

/// A request received by the fake provider.
#[derive(Debug, Clone)]
struct Received {
    method: Method,
    path: String,
    server: Option<String>,
    username: Option<String>,
    api_key: Option<String>,
    body: Option<Value>,
}

/// Fake MXroute API that records every request.
#[derive(Clone, Default)]
struct FakeProvider {
    received: Arc<Mutex<Vec<Received>>>,
    failure: Arc<Mutex<Option<StatusCode>>>,
}

impl FakeProvider {
    fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    fn fail_with(&self, status: StatusCode) {
        *self.failure.lock().unwrap() = Some(status);
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

async fn fake_provider(
    State(fake): State<FakeProvider>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> AxumResponse {
    fake.received.lock().unwrap().push(Received {
        method: method.clone(),
        path: uri.path().to_string(),
        server: header(&headers, "x-server"),
        username: header(&headers, "x-username"),
        api_key: header(&headers, "x-api-key"),
        body: serde_json::from_slice(&body).ok(),
    });

    if let Some(status) = *fake.failure.lock().unwrap() {
        return (status, Json(json!({ "success": false, "error": "boom" }))).into_response();
    }

    match method {
        Method::POST => (StatusCode::CREATED, Json(json!({ "success": true }))).into_response(),
        Method::GET => (
            StatusCode::NON_AUTHORITATIVE_INFORMATION,
            Json(json!({
                "success": true,
                "data": [{ "alias": "foo", "email": "foo@example.com" }]
            })),
        )
            .into_response(),
        Method::DELETE => StatusCode::NO_CONTENT.into_response(),
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    addr
}

// ============================================================================
// Test Harness
// ============================================================================

/// Process-wide Prometheus recorder, installed on first use.
fn metrics_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| {
            PrometheusBuilder::new()
                .install_recorder()
                .expect("Failed to install recorder")
        })
        .clone()
}

/// Test server instance.
struct TestServer {
    addr: SocketAddr,
    client: Client,
    upstream: FakeProvider,
}

impl TestServer {
    async fn new() -> Self {
        Self::start(Some(API_TOKEN), None).await
    }

    async fn with_token(token: Option<&str>) -> Self {
        Self::start(token, None).await
    }

    async fn with_metrics() -> Self {
        Self::start(Some(API_TOKEN), Some(metrics_handle())).await
    }

    async fn start(token: Option<&str>, metrics: Option<PrometheusHandle>) -> Self {
        let upstream = FakeProvider::default();
        let upstream_addr = spawn(
            Router::new()
                .fallback(fake_provider)
                .with_state(upstream.clone()),
        )
        .await;

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".parse().unwrap(),
                port: 0,
            },
            upstream: UpstreamConfig {
                base_url: format!("http://{upstream_addr}"),
                server: "fusion.mxrouting.net".to_string(),
                username: "user".to_string(),
                api_key: "key".to_string(),
                timeout_secs: 5,
            },
            auth: AuthConfig {
                api_token: token.map(ToString::to_string),
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                log_format: "text".to_string(),
                metrics_enabled: true,
                metrics_path: "/metrics".to_string(),
            },
        };

        let provider = create_provider(&config.upstream).expect("Failed to create provider");
        let mut state = AppState::new(Arc::new(config), provider);
        if let Some(handle) = metrics {
            state = state.with_metrics(handle);
        }
        let addr = spawn(create_router(state)).await;

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        Self {
            addr,
            client: Client::new(),
            upstream,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    async fn get_with_token(&self, path: &str, token: &str) -> Response {
        self.client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Request failed")
    }

    async fn add(&self, options: &str) -> Response {
        self.client
            .post(self.url("/add/alias"))
            .header("Authorization", format!("Bearer {API_TOKEN}"))
            .json(&json!({ "domain": options }))
            .send()
            .await
            .expect("Request failed")
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {API_TOKEN}"))
            .send()
            .await
            .expect("Request failed")
    }
}

/// Error response structure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: i32,
}

async fn created_email(response: Response) -> String {
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    body["data"]["email"].as_str().unwrap().to_string()
}

// ============================================================================
// Health Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["ready"], true);
}

#[tokio::test]
async fn test_ready_without_token() {
    let server = TestServer::with_token(None).await;
    let response = server.get("/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = TestServer::new().await;
    let response = server.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    assert!(text.contains("alias_gateway_up"));
}

#[tokio::test]
async fn test_metrics_count_aliases_and_upstream_calls() {
    let server = TestServer::with_metrics().await;
    created_email(
        server
            .add("domain=example.com,destination=dest@example.com")
            .await,
    )
    .await;

    let text = server.get("/metrics").await.text().await.unwrap();
    assert!(text.contains("alias_gateway_up 1"));

    let generated = text
        .lines()
        .find(|line| line.starts_with("alias_gateway_aliases_generated_total"))
        .unwrap_or_else(|| panic!("no alias counter in {text}"));
    let count: f64 = generated.rsplit(' ').next().unwrap().parse().unwrap();
    assert!(count >= 1.0);

    assert!(
        text.lines().any(|line| line.starts_with("alias_gateway_upstream_requests_total{")
            && line.contains(r#"operation="create""#)
            && line.contains(r#"outcome="success""#)),
        "no upstream counter in {text}"
    );
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_status_is_public() {
    let server = TestServer::new().await;
    let response = server.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    assert!(text.contains("running healthy"));
}

#[tokio::test]
async fn test_status_reports_missing_token() {
    let server = TestServer::with_token(None).await;
    let response = server.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.unwrap();
    assert!(text.contains("SERVER_API_TOKEN is not configured"));
}

#[tokio::test]
async fn test_forwarder_routes_require_token() {
    let server = TestServer::new().await;
    let response = server.get("/list/example.com").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Missing or invalid Authorization header");
    assert!(server.upstream.received().is_empty());
}

#[tokio::test]
async fn test_invalid_token() {
    let server = TestServer::new().await;
    let response = server
        .get_with_token("/list/example.com", "wrong-token")
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Invalid token");
    assert!(server.upstream.received().is_empty());
}

#[tokio::test]
async fn test_preflight_skips_auth() {
    let server = TestServer::new().await;
    let response = server
        .client
        .request(reqwest::Method::OPTIONS, server.url("/add/alias"))
        .header("Origin", "http://localhost")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_valid_token_reaches_provider() {
    let server = TestServer::new().await;
    let response = server
        .get_with_token("/list/example.com", API_TOKEN)
        .await;
    assert!(response.status().is_success());
    assert_eq!(server.upstream.received().len(), 1);
}

#[tokio::test]
async fn test_unconfigured_token_is_server_error() {
    let server = TestServer::with_token(None).await;
    let response = server
        .get_with_token("/list/example.com", API_TOKEN)
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "SERVER_API_TOKEN not configured");
    assert_eq!(body.code, 1001);
}

// ============================================================================
// Add Tests
// ============================================================================

#[tokio::test]
async fn test_add_with_defaults() {
    let server = TestServer::new().await;
    let email = created_email(
        server
            .add("domain=example.com,destination=dest@example.com")
            .await,
    )
    .await;

    let pattern = Regex::new(r"^[a-z]+_[a-z]+@example\.com$").unwrap();
    assert!(pattern.is_match(&email), "{email}");

    let received = server.upstream.received();
    assert_eq!(received.len(), 1);
    let request = &received[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/domains/example.com/forwarders");
    assert_eq!(request.server.as_deref(), Some("fusion.mxrouting.net"));
    assert_eq!(request.username.as_deref(), Some("user"));
    assert_eq!(request.api_key.as_deref(), Some("key"));

    let body = request.body.as_ref().unwrap();
    assert_eq!(body["destinations"], json!(["dest@example.com"]));
    assert_eq!(format!("{}@example.com", body["alias"].as_str().unwrap()), email);
}

#[tokio::test]
async fn test_add_with_slug_and_hex_template() {
    let server = TestServer::new().await;
    let email = created_email(
        server
            .add("domain=example.com,destination=dest@example.com,template=<slug>-<hex>,slug_length=1,hex_length=4")
            .await,
    )
    .await;

    let pattern = Regex::new(r"^[a-z]+_[0-9a-f]{4}@example\.com$").unwrap();
    assert!(pattern.is_match(&email), "{email}");
}

#[tokio::test]
async fn test_add_with_prefix_and_suffix() {
    let server = TestServer::new().await;
    let email = created_email(
        server
            .add("domain=example.com,destination=dest@example.com,prefix=p,suffix=s,alias_separator=-")
            .await,
    )
    .await;

    let pattern = Regex::new(r"^p-[a-z_]+-s@example\.com$").unwrap();
    assert!(pattern.is_match(&email), "{email}");
}

#[tokio::test]
async fn test_add_missing_required_options() {
    let server = TestServer::new().await;
    let response = server.add("prefix=foo").await;
    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);

    let body: ErrorBody = response.json().await.unwrap();
    assert!(body.error.contains("options are required"), "{}", body.error);
    assert!(server.upstream.received().is_empty());
}

#[tokio::test]
async fn test_add_unknown_template_part() {
    let server = TestServer::new().await;
    let response = server
        .add("domain=example.com,destination=dest@example.com,template=<bad>")
        .await;
    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);

    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Template part 'bad' is not allowed.");
    assert!(server.upstream.received().is_empty());
}

#[tokio::test]
async fn test_add_template_without_parts() {
    let server = TestServer::new().await;
    let response = server
        .add("domain=example.com,destination=dest@example.com,template=plain,prefix=shop")
        .await;
    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);

    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.code, 3003);
    assert!(body.error.contains("'template'"), "{}", body.error);
    assert!(server.upstream.received().is_empty());
}

#[tokio::test]
async fn test_add_upstream_failure() {
    let server = TestServer::new().await;
    server.upstream.fail_with(StatusCode::INTERNAL_SERVER_ERROR);

    let response = server
        .add("domain=example.com,destination=dest@example.com")
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorBody = response.json().await.unwrap();
    assert!(body.error.contains("500"), "{}", body.error);
    assert_eq!(server.upstream.received().len(), 1);
}

// ============================================================================
// List and Delete Tests
// ============================================================================

#[tokio::test]
async fn test_list_forwarders() {
    let server = TestServer::new().await;
    let response = server
        .get_with_token("/list/example.com", API_TOKEN)
        .await;
    assert_eq!(response.status(), StatusCode::NON_AUTHORITATIVE_INFORMATION);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body[0]["alias"], "foo");

    let received = server.upstream.received();
    assert_eq!(received[0].method, Method::GET);
    assert_eq!(received[0].path, "/domains/example.com/forwarders");
}

#[tokio::test]
async fn test_delete_forwarder() {
    let server = TestServer::new().await;
    let response = server.delete("/delete/foo@example.com").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let received = server.upstream.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].method, Method::DELETE);
    assert_eq!(received[0].path, "/domains/example.com/forwarders/foo");
}

#[tokio::test]
async fn test_delete_invalid_email() {
    let server = TestServer::new().await;
    let response = server.delete("/delete/invalid-email").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Invalid email format.");
    assert!(server.upstream.received().is_empty());
}
