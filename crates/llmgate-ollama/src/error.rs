//! Mapping from `reqwest` failures to port errors.

use llmgate_core::UpstreamError;

/// Classify a `reqwest` error.
///
/// Timeouts stay distinguishable from every other failure.
pub(crate) fn classify(err: &reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else if err.is_decode() {
        UpstreamError::Decode(err.to_string())
    } else {
        UpstreamError::Connection(err.to_string())
    }
}
