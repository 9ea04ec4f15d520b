//! Forwarder service.
//!
//! Turns a raw option string into a generated alias and asks the provider to
//! create the forwarder; also fronts the list and delete passthroughs.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::{CreatedForwarder, ForwarderAddress, NewForwarder};
use crate::error::Result;
use crate::service::{generator, options};
use crate::upstream::ForwarderProvider;

/// Service for forwarder management.
pub struct ForwarderService {
    /// Upstream provider.
    provider: Arc<dyn ForwarderProvider>,
}

impl ForwarderService {
    /// Create a new forwarder service.
    pub fn new(provider: Arc<dyn ForwarderProvider>) -> Self {
        Self { provider }
    }

    /// Generate an alias from `raw_options` and create its forwarder.
    ///
    /// Options and template are fully validated before the provider is called.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unusable options, or an upstream error if the
    /// provider rejects the forwarder.
    pub async fn create(&self, raw_options: &str) -> Result<CreatedForwarder> {
        let set = options::collect_options(raw_options.split(','));
        for key in set.unrecognized_keys() {
            debug!(key, "Ignoring unrecognized option");
        }

        let resolved = options::resolve(&set)?;
        let alias = generator::generate(&resolved.template, &resolved.formatting)?;
        metrics::counter!("alias_gateway_aliases_generated_total").increment(1);

        self.provider
            .create_forwarder(
                &resolved.domain,
                &NewForwarder::new(alias.clone(), resolved.destination),
            )
            .await?;

        let created = CreatedForwarder {
            alias,
            domain: resolved.domain,
        };
        info!(email = %created.email(), "Forwarder created");

        Ok(created)
    }

    /// List the forwarders of `domain`, with the provider's status.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the provider call fails.
    pub async fn list(&self, domain: &str) -> Result<(StatusCode, Value)> {
        Ok(self.provider.list_forwarders(domain).await?)
    }

    /// Delete the forwarder for an `alias@domain` address.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::InvalidEmail`] for a malformed address, or an
    /// upstream error if the provider call fails.
    pub async fn delete(&self, email: &str) -> Result<StatusCode> {
        let address: ForwarderAddress = email.parse()?;
        let status = self
            .provider
            .delete_forwarder(&address.domain, &address.alias)
            .await?;

        info!(alias = %address.alias, domain = %address.domain, "Forwarder deleted");
        Ok(status)
    }
}
