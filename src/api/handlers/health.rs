//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::api::state::AppState;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<Value> {
    Json(json!({
        "code": 0,
        "message": "success",
        "data": {
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

/// Readiness probe - checks that the service has what it needs to serve requests.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let token_ok = state.token_verifier.is_configured();
    let upstream_ok = state.config.upstream.has_credentials();
    let is_ready = token_ok && upstream_ok;

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = Json(json!({
        "code": if is_ready { 0 } else { 1001 },
        "message": if is_ready { "success" } else { "service not configured" },
        "data": {
            "ready": is_ready,
            "components": {
                "api_token": token_ok,
                "upstream_credentials": upstream_ok
            }
        }
    }));

    (status_code, response)
}

/// Public status line. Reports when no API token is configured.
pub async fn status(State(state): State<AppState>) -> &'static str {
    if state.token_verifier.is_configured() {
        "MXroute alias gateway is running healthy."
    } else {
        "MXroute alias gateway is running, but SERVER_API_TOKEN is not configured."
    }
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = String::new();

    output.push_str("# HELP alias_gateway_up Whether the service is up\n");
    output.push_str("# TYPE alias_gateway_up gauge\n");
    output.push_str("alias_gateway_up 1\n");

    if let Some(handle) = &state.metrics {
        output.push_str(&handle.render());
    }

    output
}
