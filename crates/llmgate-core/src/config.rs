//! Gateway configuration.
//!
//! `GatewayConfig` is built once at startup and handed to
//! [`GatewayContext`](crate::GatewayContext). Only the upstream address is
//! read from the environment; the required model and the timeouts are
//! fixed defaults that callers may override with the `with_*` builders.

use std::time::Duration;

use thiserror::Error;

/// Model identifier the gateway requires to be loaded upstream.
pub const DEFAULT_MODEL: &str = "deepseek-r1:7b";

/// Default upstream host when `OLLAMA_HOST` is unset.
pub const DEFAULT_UPSTREAM_HOST: &str = "localhost";

/// Default upstream port when `OLLAMA_PORT` is unset.
pub const DEFAULT_UPSTREAM_PORT: u16 = 11434;

/// Environment variable naming the upstream host.
pub const ENV_UPSTREAM_HOST: &str = "OLLAMA_HOST";

/// Environment variable naming the upstream port.
pub const ENV_UPSTREAM_PORT: &str = "OLLAMA_PORT";

/// Upper bound on a single generation call.
pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on the model listing and version probes.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The upstream port variable is not a valid TCP port.
    #[error("Invalid value for {var}: '{value}' is not a valid port")]
    InvalidPort {
        /// Variable that held the bad value
        var: &'static str,
        /// The rejected value
        value: String,
    },

    /// The upstream host variable is set but empty.
    #[error("{0} is set but empty")]
    EmptyHost(&'static str),
}

/// Configuration for the gateway and its upstream backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Upstream host name or address.
    pub upstream_host: String,
    /// Upstream port.
    pub upstream_port: u16,
    /// Model identifier that must be present in the upstream catalog.
    pub model: String,
    /// Bound on the generation call.
    pub generate_timeout: Duration,
    /// Bound on the catalog and version probes.
    pub probe_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            upstream_host: DEFAULT_UPSTREAM_HOST.to_string(),
            upstream_port: DEFAULT_UPSTREAM_PORT,
            model: DEFAULT_MODEL.to_string(),
            generate_timeout: DEFAULT_GENERATE_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the upstream address from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the upstream address through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(ENV_UPSTREAM_HOST) {
            let host = host.trim();
            if host.is_empty() {
                return Err(ConfigError::EmptyHost(ENV_UPSTREAM_HOST));
            }
            config.upstream_host = host.to_string();
        }

        if let Some(raw) = lookup(ENV_UPSTREAM_PORT) {
            config.upstream_port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    var: ENV_UPSTREAM_PORT,
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }

    /// Base URL of the upstream backend, e.g. `http://localhost:11434`.
    #[must_use]
    pub fn upstream_base_url(&self) -> String {
        format!("http://{}:{}", self.upstream_host, self.upstream_port)
    }

    /// Set the upstream host.
    #[must_use]
    pub fn with_upstream_host(mut self, host: impl Into<String>) -> Self {
        self.upstream_host = host.into();
        self
    }

    /// Set the upstream port.
    #[must_use]
    pub const fn with_upstream_port(mut self, port: u16) -> Self {
        self.upstream_port = port;
        self
    }

    /// Set the required model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the generation timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_generate_timeout(mut self, timeout: Duration) -> Self {
        self.generate_timeout = timeout;
        self
    }

    /// Set the probe timeout.
    ///
    /// Defaults to 5 seconds.
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}
