//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::service::{ForwarderService, TokenVerifier};
use crate::upstream::ForwarderProvider;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Forwarder service.
    pub forwarder_service: Arc<ForwarderService>,
    /// Bearer token verifier.
    pub token_verifier: Arc<TokenVerifier>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<AppConfig>, provider: Arc<dyn ForwarderProvider>) -> Self {
        let forwarder_service = Arc::new(ForwarderService::new(provider));
        let token_verifier = Arc::new(TokenVerifier::new(&config.auth));

        Self {
            config,
            forwarder_service,
            token_verifier,
            metrics: None,
        }
    }

    /// Attach the handle used to render `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
