//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};

/// Request to create an alias.
///
/// Password managers send the comma-separated option string in `domain`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddAliasRequest {
    /// Comma-separated `key=value` options.
    pub domain: String,

    /// Free-form description; accepted and ignored.
    #[serde(default)]
    pub description: Option<String>,
}

/// Wrapper matching the `{"data": ...}` shape clients expect.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    /// Payload.
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wrap a payload.
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}

/// Created alias address.
#[derive(Debug, Clone, Serialize)]
pub struct EmailData {
    /// Full `alias@domain` address.
    pub email: String,
}

/// Plain message response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
