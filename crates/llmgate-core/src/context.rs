//! Gateway context - the explicit replacement for process-wide state.
//!
//! Built once at startup from a [`GatewayConfig`] and an
//! [`InferenceBackend`], then shared (behind an `Arc`) by every request.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::ports::InferenceBackend;
use crate::services::{AvailabilityChecker, GenerationOrchestrator, HealthReporter};

/// Everything a request handler needs, wired together.
#[derive(Clone)]
pub struct GatewayContext {
    config: GatewayConfig,
    orchestrator: GenerationOrchestrator,
    health: HealthReporter,
}

impl GatewayContext {
    /// Wire the services to a backend.
    pub fn new(config: GatewayConfig, backend: Arc<dyn InferenceBackend>) -> Self {
        let availability =
            AvailabilityChecker::new(backend.clone(), config.model.clone(), config.probe_timeout);
        let orchestrator = GenerationOrchestrator::new(
            backend.clone(),
            availability.clone(),
            config.generate_timeout,
        );
        let health = HealthReporter::new(backend, availability, config.probe_timeout);

        Self {
            config,
            orchestrator,
            health,
        }
    }

    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub const fn orchestrator(&self) -> &GenerationOrchestrator {
        &self.orchestrator
    }

    pub const fn health(&self) -> &HealthReporter {
        &self.health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use std::time::Duration;

    #[tokio::test]
    async fn test_context_uses_configured_model() {
        let backend = Arc::new(FakeBackend::new().with_models(["llama3:8b"]));
        let config = GatewayConfig::new()
            .with_model("llama3:8b")
            .with_generate_timeout(Duration::from_secs(1));
        let ctx = GatewayContext::new(config, backend.clone());

        assert_eq!(ctx.orchestrator().model(), "llama3:8b");
        assert!(ctx.health().report().await.is_healthy());

        let result = ctx
            .orchestrator()
            .generate_from_json(br#"{"prompt": "hi"}"#)
            .await
            .unwrap();
        assert_eq!(result.metadata.model, "llama3:8b");
        assert_eq!(backend.last_generate_request().unwrap().model, "llama3:8b");
    }
}
