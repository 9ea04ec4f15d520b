//! MXroute API client.
//!
//! Forwarders are managed under `{base_url}/domains/{domain}/forwarders`, with the
//! account identified by the `X-Server`, `X-Username` and `X-API-Key` headers.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::UpstreamConfig;
use crate::domain::NewForwarder;
use crate::error::{UpstreamError, UpstreamResult};
use crate::upstream::traits::ForwarderProvider;

/// HTTP client for the MXroute forwarder API.
#[derive(Debug, Clone)]
pub struct MxrouteClient {
    http: Client,
    base_url: Url,
    server: String,
    username: String,
    api_key: String,
}

impl MxrouteClient {
    /// Create a client from upstream configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client cannot be built.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| UpstreamError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Url(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            server: config.server.clone(),
            username: config.username.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// URL of a domain's forwarder collection, or of one forwarder in it.
    fn forwarders_url(&self, domain: &str, alias: Option<&str>) -> UpstreamResult<Url> {
        if let Some(segment) = [Some(domain), alias]
            .into_iter()
            .flatten()
            .find(|s| matches!(*s, "" | "." | ".."))
        {
            return Err(UpstreamError::Url(format!(
                "'{segment}' is not a valid path segment"
            )));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                UpstreamError::Url(format!("{} cannot be used as a base URL", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .extend(["domains", domain, "forwarders"]);
            if let Some(alias) = alias {
                segments.push(alias);
            }
        }
        Ok(url)
    }

    /// Attach account headers.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Server", &self.server)
            .header("X-Username", &self.username)
            .header("X-API-Key", &self.api_key)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    /// Send a request and turn non-success statuses into errors.
    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> UpstreamResult<Response> {
        let response = match self.authorize(request).send().await {
            Ok(response) => response,
            Err(err) => {
                record(operation, "transport_error");
                warn!(operation, error = %err, "Upstream request failed");
                return Err(err.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            record(operation, "status_error");
            let body = response.text().await.unwrap_or_default();
            warn!(operation, %status, "Upstream returned an error status");
            return Err(UpstreamError::Status { status, body });
        }

        record(operation, "success");
        debug!(operation, %status, "Upstream request succeeded");
        Ok(response)
    }
}

fn record(operation: &'static str, outcome: &'static str) {
    metrics::counter!(
        "alias_gateway_upstream_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

#[async_trait]
impl ForwarderProvider for MxrouteClient {
    async fn create_forwarder(
        &self,
        domain: &str,
        forwarder: &NewForwarder,
    ) -> UpstreamResult<()> {
        let url = self.forwarders_url(domain, None)?;
        self.send("create", self.http.post(url).json(forwarder)).await?;
        Ok(())
    }

    async fn list_forwarders(&self, domain: &str) -> UpstreamResult<(StatusCode, Value)> {
        let url = self.forwarders_url(domain, None)?;
        let response = self.send("list", self.http.get(url)).await?;
        let status = response.status();
        let mut body: Value = response.json().await?;

        body.get_mut("data")
            .map(|data| (status, data.take()))
            .ok_or_else(|| UpstreamError::Decode("response has no 'data' member".to_string()))
    }

    async fn delete_forwarder(&self, domain: &str, alias: &str) -> UpstreamResult<StatusCode> {
        let url = self.forwarders_url(domain, Some(alias))?;
        let response = self.send("delete", self.http.delete(url)).await?;
        Ok(response.status())
    }
}
