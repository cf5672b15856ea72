//! Domain types for the gateway.
//!
//! Every type here is request-scoped: it is built while handling a single
//! HTTP request and dropped at its end. Nothing is cached or persisted.

mod health;
mod request;
mod response;
mod upstream;

pub use health::{HealthState, HealthStatus, SERVICE_DEGRADED_MESSAGE};
pub use request::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_P, GenerationOptions,
    GenerationParameters, GenerationRequest,
};
pub use response::{GatewayResponse, GenerationMetadata, GenerationResult};
pub use upstream::{ModelCatalog, UpstreamGenerateRequest, UpstreamGeneration};
