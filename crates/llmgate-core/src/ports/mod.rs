//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the gateway services expect from
//! infrastructure. They use only domain types; no `reqwest` or `axum`
//! types appear in any signature.

pub mod inference;

pub use inference::{InferenceBackend, UpstreamError};

#[cfg(test)]
pub use inference::MockInferenceBackend;
