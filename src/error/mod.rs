//! Error handling module.
//!
//! This module provides unified error handling with proper HTTP status code mapping
//! and standardized API error responses.

pub mod codes;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::ErrorCode;

/// Validation failures raised while turning options into an alias.
///
/// All of these are detected before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    /// `domain` or `destination` is absent.
    #[error("The 'domain' and 'destination' options are required to be configured.")]
    MissingRequiredOption,

    /// The template names a part outside the allowed set.
    #[error("Template part '{0}' is not allowed.")]
    InvalidTemplatePart(String),

    /// An option carries a value that cannot be used.
    #[error("Invalid value '{value}' for option '{key}': {reason}")]
    InvalidOptionValue {
        /// Option name.
        key: String,
        /// Raw value as supplied.
        value: String,
        /// What was expected instead.
        reason: String,
    },
}

impl AliasError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingRequiredOption => ErrorCode::MISSING_OPTION,
            Self::InvalidTemplatePart(_) => ErrorCode::INVALID_TEMPLATE_PART,
            Self::InvalidOptionValue { .. } => ErrorCode::INVALID_OPTION,
        }
    }
}

/// Upstream provider error type.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request never produced a response (connect failure, timeout, ...).
    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("Upstream returned {status}: {body}")]
    Status {
        /// HTTP status returned by the provider.
        status: StatusCode,
        /// Response body, as text.
        body: String,
    },

    /// The provider's response could not be decoded.
    #[error("Invalid upstream response: {0}")]
    Decode(String),

    /// A request URL could not be built.
    #[error("Invalid upstream URL: {0}")]
    Url(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Alias options or template failed validation.
    #[error(transparent)]
    Alias(#[from] AliasError),

    /// Malformed `alias@domain` address.
    #[error("Invalid email format.")]
    InvalidEmail(String),

    /// Invalid request body.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Authentication failed.
    #[error("{0}")]
    Unauthorized(String),

    /// A bearer token was presented but does not match.
    #[error("Invalid token")]
    InvalidToken,

    /// A server-side setting required by the request is missing.
    #[error("{0}")]
    NotConfigured(String),

    /// Upstream provider error.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Alias(err) => err.error_code(),
            Self::InvalidEmail(_) => ErrorCode::INVALID_EMAIL,
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST,
            Self::Unauthorized(_) => ErrorCode::UNAUTHORIZED,
            Self::InvalidToken => ErrorCode::INVALID_TOKEN,
            Self::NotConfigured(_) => ErrorCode::NOT_CONFIGURED,
            Self::Upstream(_) => ErrorCode::UPSTREAM_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Alias(_) => StatusCode::PRECONDITION_FAILED,
            Self::InvalidEmail(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::NotConfigured(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().as_i32();
        let message = self.to_string();

        tracing::error!(
            error_code = code,
            status = %status,
            message = %message,
            "Request failed"
        );

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `AliasError`.
pub type AliasResult<T> = std::result::Result<T, AliasError>;

/// Result type alias using `UpstreamError`.
pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;
