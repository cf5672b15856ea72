//! Gateway health reporting.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{HealthStatus, SERVICE_DEGRADED_MESSAGE};
use crate::ports::{InferenceBackend, UpstreamError};
use crate::services::AvailabilityChecker;

/// Answers liveness queries from a version probe plus an availability check.
#[derive(Clone)]
pub struct HealthReporter {
    backend: Arc<dyn InferenceBackend>,
    availability: AvailabilityChecker,
    timeout: Duration,
}

impl HealthReporter {
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

    /// Probe the upstream and build a health report.
    ///
    /// Healthy iff the version probe succeeds and the model is available.
    /// Never fails: probe errors end up in the report's `error` field.
    pub async fn report(&self) -> HealthStatus {
        let probe = tokio::time::timeout(self.timeout, self.backend.version());
        let (version, model_available) =
            tokio::join!(probe, self.availability.is_model_available());

        let version = version.unwrap_or(Err(UpstreamError::Timeout));

        match version {
            Ok(version) if model_available => {
                debug!(version = %version, "Upstream healthy");
                HealthStatus::healthy(version)
            }
            Ok(_) => {
                warn!(
                    model = %self.availability.model(),
                    "Upstream reachable but model is not available"
                );
                HealthStatus::unhealthy(false, SERVICE_DEGRADED_MESSAGE)
            }
            Err(UpstreamError::Status { status, .. }) => {
                warn!(status, "Upstream version probe returned a non-success status");
                HealthStatus::unhealthy(model_available, SERVICE_DEGRADED_MESSAGE)
            }
            Err(e) => {
                warn!("Upstream version probe failed: {e}");
                HealthStatus::unhealthy(model_available, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HealthState;
    use crate::testing::FakeBackend;

    const MODEL: &str = "deepseek-r1:7b";

    fn reporter(backend: Arc<dyn InferenceBackend>) -> HealthReporter {
        let availability =
            AvailabilityChecker::new(backend.clone(), MODEL, Duration::from_secs(5));
        HealthReporter::new(backend, availability, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_healthy_when_probe_ok_and_model_loaded() {
        let backend = Arc::new(FakeBackend::new().with_version("0.5.7"));

        let status = reporter(backend.clone()).report().await;

        assert_eq!(status, HealthStatus::healthy("0.5.7"));
        assert_eq!(status.status_code(), 200);
        assert_eq!(backend.version_calls(), 1);
        assert_eq!(backend.list_models_calls(), 1);
    }

    #[tokio::test]
    async fn test_unhealthy_when_model_missing() {
        let backend = Arc::new(FakeBackend::new().with_models(["llama3:8b"]));

        let status = reporter(backend).report().await;

        assert_eq!(status.status, HealthState::Unhealthy);
        assert!(!status.model_available);
        assert_eq!(status.error.as_deref(), Some(SERVICE_DEGRADED_MESSAGE));
        assert!(status.version.is_none());
        assert_eq!(status.status_code(), 503);
    }

    #[tokio::test]
    async fn test_unhealthy_when_probe_returns_bad_status() {
        let backend = Arc::new(FakeBackend::new().with_version_error(UpstreamError::Status {
            status: 500,
            body: String::new(),
        }));

        let status = reporter(backend).report().await;

        assert_eq!(status, HealthStatus::unhealthy(true, SERVICE_DEGRADED_MESSAGE));
    }

    #[tokio::test]
    async fn test_unhealthy_with_cause_when_probe_fails() {
        let backend = Arc::new(
            FakeBackend::new()
                .with_version_error(UpstreamError::Connection("connection refused".to_string()))
                .with_models_error(UpstreamError::Connection("connection refused".to_string())),
        );

        let status = reporter(backend).report().await;

        assert!(!status.is_healthy());
        assert!(!status.model_available);
        assert!(status.error.unwrap().contains("connection refused"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unhealthy_when_probe_hangs() {
        let backend = Arc::new(FakeBackend::new().with_version_delay(Duration::from_secs(60)));

        let status = reporter(backend).report().await;

        assert!(!status.is_healthy());
        assert!(status.model_available);
        assert_eq!(
            status.error.as_deref(),
            Some(UpstreamError::Timeout.to_string().as_str())
        );
    }
}
