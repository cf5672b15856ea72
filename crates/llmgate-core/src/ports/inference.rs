//! Inference backend port.
//!
//! This port abstracts the upstream inference server (an Ollama-compatible
//! HTTP API). The gateway needs exactly three capabilities from it: list
//! loaded models, run a single non-streaming generation, and report its
//! version.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ModelCatalog, UpstreamGenerateRequest, UpstreamGeneration};

/// Errors raised while talking to the upstream backend.
///
/// `Timeout` is kept separate from the other variants so callers can tell
/// a slow upstream from a broken one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The call did not complete within its time bound.
    #[error("Request to upstream timed out")]
    Timeout,

    /// The upstream could not be reached (refused, reset, DNS failure).
    #[error("Connection to upstream failed: {0}")]
    Connection(String),

    /// The upstream answered with a non-success HTTP status.
    #[error("Upstream returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The upstream answered but the body could not be decoded.
    #[error("Malformed upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Returns true if this error is a time-bound expiry.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Port for the upstream inference server.
///
/// Implementations must tolerate concurrent use: every method is a
/// self-contained request/response exchange and the gateway calls them
/// from many requests at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Fetch the catalog of models currently available upstream.
    async fn list_models(&self) -> Result<ModelCatalog, UpstreamError>;

    /// Run a single, complete (non-streaming) generation.
    async fn generate(
        &self,
        request: &UpstreamGenerateRequest,
    ) -> Result<UpstreamGeneration, UpstreamError>;

    /// Probe the upstream version.
    ///
    /// Returns `"unknown"` when the upstream answers successfully without a
    /// version field.
    async fn version(&self) -> Result<String, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_distinct() {
        assert!(UpstreamError::Timeout.is_timeout());
        assert!(!UpstreamError::Connection("refused".to_string()).is_timeout());
        assert!(
            !UpstreamError::Status {
                status: 500,
                body: String::new()
            }
            .is_timeout()
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = UpstreamError::Status {
            status: 404,
            body: "model not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("model not found"));
    }
}
