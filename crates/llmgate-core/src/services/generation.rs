//! Generation orchestration: validate, gate on availability, forward, reshape.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::{GenerationRequest, GenerationResult, UpstreamGenerateRequest};
use crate::error::GenerateError;
use crate::ports::InferenceBackend;
use crate::services::AvailabilityChecker;

/// Forwards validated generation requests to the upstream backend.
///
/// The availability check and the generation call are two separate upstream
/// requests; the model can disappear between them, in which case the
/// generation call fails and is reported as an upstream error.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    backend: Arc<dyn InferenceBackend>,
    availability: AvailabilityChecker,
    timeout: Duration,
}

impl GenerationOrchestrator {
    pub const fn new(
        backend: Arc<dyn InferenceBackend>,
        availability: AvailabilityChecker,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            availability,
            timeout,
        }
    }

    /// Model every generation is sent to.
    pub fn model(&self) -> &str {
        self.availability.model()
    }

    /// Validate a raw JSON body and run it through [`Self::generate`].
    ///
    /// Validation failures return before any upstream traffic.
    pub async fn generate_from_json(
        &self,
        body: &[u8],
    ) -> Result<GenerationResult, GenerateError> {
        let request = GenerationRequest::from_json_slice(body).inspect_err(|e| {
            warn!("Rejected generation request: {e}");
        })?;
        self.generate(request).await
    }

    /// Run a validated request against the upstream backend.
    ///
    /// 1. Gate on availability (`ModelUnavailable` if the model is absent)
    /// 2. Send the prompt with resolved options, bounded by the generation
    ///    timeout (`Timeout` on expiry, `Upstream` on any other failure)
    /// 3. Reshape the reply into a [`GenerationResult`]
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerateError> {
        if !self.availability.is_model_available().await {
            warn!(model = %self.model(), "Model is not available; skipping generation");
            return Err(GenerateError::ModelUnavailable);
        }

        let options = request.parameters.resolve();
        let payload = UpstreamGenerateRequest::new(self.model(), request.prompt, options);

        info!(
            model = %payload.model,
            temperature = options.temperature,
            top_p = options.top_p,
            max_tokens = options.max_tokens,
            "Sending request to model"
        );

        // Dropping the in-flight future on expiry aborts the upstream request.
        let call = tokio::time::timeout(self.timeout, self.backend.generate(&payload));
        let upstream = match call.await {
            Ok(Ok(upstream)) => upstream,
            Ok(Err(e)) => {
                let err = GenerateError::from(e);
                error!("Error processing request: {err}");
                return Err(err);
            }
            Err(_) => {
                error!(timeout = ?self.timeout, "Model request timed out");
                return Err(GenerateError::Timeout);
            }
        };

        let result = GenerationResult::from_upstream(&upstream, self.model());
        debug!(
            total_tokens = %result.metadata.total_tokens,
            chars = result.text.len(),
            "Upstream generation complete"
        );
        info!("Successfully processed request");

        Ok(result)
    }
}
