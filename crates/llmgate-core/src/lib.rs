#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, DEFAULT_GENERATE_TIMEOUT, DEFAULT_MODEL, DEFAULT_PROBE_TIMEOUT,
    DEFAULT_UPSTREAM_HOST, DEFAULT_UPSTREAM_PORT, ENV_UPSTREAM_HOST, ENV_UPSTREAM_PORT,
    GatewayConfig,
};
pub use context::GatewayContext;
pub use domain::{
    GatewayResponse, GenerationMetadata, GenerationOptions, GenerationParameters,
    GenerationRequest, GenerationResult, HealthState, HealthStatus, ModelCatalog,
    UpstreamGenerateRequest, UpstreamGeneration,
};
pub use error::GenerateError;
pub use ports::{InferenceBackend, UpstreamError};
pub use services::{AvailabilityChecker, GenerationOrchestrator, HealthReporter};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
