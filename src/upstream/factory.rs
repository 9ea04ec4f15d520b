//! Provider factory.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::UpstreamConfig;
use crate::error::UpstreamResult;
use crate::upstream::mxroute::MxrouteClient;
use crate::upstream::traits::ForwarderProvider;

/// Create the upstream provider client.
///
/// Missing credentials are reported but do not stop startup; the provider will
/// reject calls until they are configured.
///
/// # Errors
///
/// Returns an error if the base URL is unusable or the HTTP client cannot be built.
pub fn create_provider(config: &UpstreamConfig) -> UpstreamResult<Arc<dyn ForwarderProvider>> {
    if !config.has_credentials() {
        warn!("Upstream credentials are incomplete; forwarder calls will fail");
    }

    let client = MxrouteClient::new(config)?;
    info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "Upstream client initialized"
    );

    Ok(Arc::new(client))
}
