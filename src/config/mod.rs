//! Configuration management module.
//!
//! Supports loading configuration from:
//! - A `.env` file in the working directory
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `ALIAS_GATEWAY__<SECTION>__<KEY>` pattern
//! - The legacy `MXROUTE_*` and `SERVER_API_TOKEN` variables

mod server;
mod upstream;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

/// Legacy variables mapped onto configuration keys.
const LEGACY_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("MXROUTE_SERVER", "upstream.server"),
    ("MXROUTE_USERNAME", "upstream.username"),
    ("MXROUTE_API_KEY", "upstream.api_key"),
    ("SERVER_API_TOKEN", "auth.api_token"),
];

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream provider configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `.env` (only populates the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{ALIAS_GATEWAY_PROFILE}.toml` (if `ALIAS_GATEWAY_PROFILE` is set)
    /// 4. Environment variables with `ALIAS_GATEWAY__` prefix
    /// 5. `MXROUTE_SERVER`, `MXROUTE_USERNAME`, `MXROUTE_API_KEY`, `SERVER_API_TOKEN`
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        hydrate_env_file()?;

        let profile =
            std::env::var("ALIAS_GATEWAY_PROFILE").unwrap_or_else(|_| "development".to_string());

        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // ALIAS_GATEWAY__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::with_prefix("ALIAS_GATEWAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in LEGACY_ENV_OVERRIDES {
            let value = std::env::var(var).ok().filter(|v| !v.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        let app_config: Self = builder.build()?.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        self.upstream.validate()?;

        if !matches!(self.observability.log_format.as_str(), "text" | "json") {
            return Err(ConfigError::Message(format!(
                "observability.log_format must be 'text' or 'json', got '{}'",
                self.observability.log_format
            )));
        }

        if !self.observability.metrics_path.starts_with('/') {
            return Err(ConfigError::Message(
                "observability.metrics_path must start with '/'".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load `.env` into the process environment; a missing file is fine.
fn hydrate_env_file() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(ConfigError::Message(format!("failed to read .env: {err}"))),
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Bearer token every protected request must present.
    ///
    /// When unset, protected routes answer 500 instead of serving requests.
    #[serde(default)]
    pub api_token: Option<String>,
}

impl AuthConfig {
    /// The configured token, ignoring empty values.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable Prometheus metrics endpoint.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,

    /// Metrics endpoint path.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
            metrics_path: default_metrics_path(),
        }
    }
}
