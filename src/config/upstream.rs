//! Upstream provider configuration.

use config::ConfigError;
use serde::Deserialize;
use url::Url;

/// MXroute API connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the provider API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Mail server the account lives on, sent as `X-Server`.
    #[serde(default)]
    pub server: String,

    /// Account user name, sent as `X-Username`.
    #[serde(default)]
    pub username: String,

    /// API key, sent as `X-API-Key`.
    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.mxroute.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl UpstreamConfig {
    /// Whether all provider credentials are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.server.is_empty() && !self.username.is_empty() && !self.api_key.is_empty()
    }

    /// Validate the upstream configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot serve as a base for forwarder paths
    /// or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Message(format!("upstream.base_url is not a valid URL: {e}"))
        })?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::Message(
                "upstream.base_url must be an absolute http(s) URL".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "upstream.timeout_secs cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            server: String::new(),
            username: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
