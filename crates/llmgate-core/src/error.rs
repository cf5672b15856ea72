//! Generation error taxonomy.
//!
//! Every failure on the generation path is one of these variants. The HTTP
//! adapter maps them to a status code with [`GenerateError::status_code`]
//! and renders the `Display` text as the `error` field.

use thiserror::Error;

use crate::ports::UpstreamError;

/// Message returned when the required model is not in the upstream catalog.
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "Model is not available";

/// Message returned when the generation call exceeds its time bound.
pub const TIMEOUT_MESSAGE: &str = "Model request timed out";

/// Errors produced while handling a generation request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// The inbound request was rejected before any upstream traffic.
    #[error("{0}")]
    Validation(String),

    /// The required model is not available upstream.
    #[error("Model is not available")]
    ModelUnavailable,

    /// The generation call did not finish within its bound.
    #[error("Model request timed out")]
    Timeout,

    /// The upstream failed at the transport or protocol level.
    #[error("Error communicating with model: {0}")]
    Upstream(String),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

impl GenerateError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::ModelUnavailable => 503,
            Self::Timeout | Self::Upstream(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true if a caller may reasonably retry later.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ModelUnavailable)
    }
}

impl From<UpstreamError> for GenerateError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout => Self::Timeout,
            other => Self::Upstream(other.to_string()),
        }
    }
}
