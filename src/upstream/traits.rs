//! Provider trait definitions.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;

use crate::domain::NewForwarder;
use crate::error::UpstreamResult;

/// Forwarder operations offered by an email provider.
///
/// Calls are made once; a failed call is reported, never retried.
#[async_trait]
pub trait ForwarderProvider: Send + Sync {
    /// Create a forwarder on `domain`.
    async fn create_forwarder(
        &self,
        domain: &str,
        forwarder: &NewForwarder,
    ) -> UpstreamResult<()>;

    /// List the forwarders of `domain`, as the provider describes them, along
    /// with the provider's success status.
    async fn list_forwarders(&self, domain: &str) -> UpstreamResult<(StatusCode, Value)>;

    /// Delete `alias` from `domain`, returning the provider's success status.
    async fn delete_forwarder(&self, domain: &str, alias: &str) -> UpstreamResult<StatusCode>;
}
