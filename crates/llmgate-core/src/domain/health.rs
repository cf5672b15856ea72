//! Health report types.

use serde::{Deserialize, Serialize};

/// Error text used when the upstream answered but is not fully usable.
pub const SERVICE_DEGRADED_MESSAGE: &str = "Service not fully operational";

/// Overall gateway health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: HealthState,
    /// Upstream version, only reported when healthy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub model_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    /// Upstream reachable and the required model loaded.
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status: HealthState::Healthy,
            version: Some(version.into()),
            model_available: true,
            error: None,
        }
    }

    /// Anything short of healthy.
    pub fn unhealthy(model_available: bool, error: impl Into<String>) -> Self {
        Self {
            status: HealthState::Unhealthy,
            version: None,
            model_available,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self.status, HealthState::Healthy)
    }

    /// 200 when healthy, 503 otherwise.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        if self.is_healthy() { 200 } else { 503 }
    }
}
