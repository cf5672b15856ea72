//! Upstream model availability check.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::ports::InferenceBackend;

/// Checks whether the required model is present in the upstream catalog.
///
/// The catalog is fetched on every call. Any failure to obtain it (transport
/// error, bad status, malformed body, timeout) is logged and reported as
/// "not available"; nothing is retried.
#[derive(Clone)]
pub struct AvailabilityChecker {
    backend: Arc<dyn InferenceBackend>,
    model: String,
    timeout: Duration,
}

impl AvailabilityChecker {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            model: model.into(),
            timeout,
        }
    }

    /// The model identifier this checker looks for.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns true iff the upstream catalog lists the model right now.
    pub async fn is_model_available(&self) -> bool {
        match tokio::time::timeout(self.timeout, self.backend.list_models()).await {
            Ok(Ok(catalog)) => {
                let available = catalog.contains(&self.model);
                debug!(
                    model = %self.model,
                    available,
                    loaded = catalog.len(),
                    "Checked model availability"
                );
                available
            }
            Ok(Err(e)) => {
                error!("Error checking model availability: {e}");
                false
            }
            Err(_) => {
                error!(timeout = ?self.timeout, "Model availability check timed out");
                false
            }
        }
    }
}
