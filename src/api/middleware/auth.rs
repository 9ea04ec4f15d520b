//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::error::AppError;
use crate::service::TokenCheck;

const NOT_CONFIGURED: &str = "SERVER_API_TOKEN not configured";

/// Extract bearer token from Authorization header.
fn extract_bearer_token(req: &Request<Body>) -> Option<&str> {
    let auth_header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;

    auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware that requires the configured API token.
///
/// CORS preflight (`OPTIONS`) requests pass through untouched.
pub async fn require_token(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    if !state.token_verifier.is_configured() {
        return AppError::NotConfigured(NOT_CONFIGURED.to_string()).into_response();
    }

    let Some(token) = extract_bearer_token(&req) else {
        return AppError::Unauthorized("Missing or invalid Authorization header".to_string())
            .into_response();
    };

    match state.token_verifier.verify(token) {
        TokenCheck::Valid => next.run(req).await,
        TokenCheck::Invalid => AppError::InvalidToken.into_response(),
        TokenCheck::NotConfigured => {
            AppError::NotConfigured(NOT_CONFIGURED.to_string()).into_response()
        }
    }
}
