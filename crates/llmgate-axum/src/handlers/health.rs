//! Health and fallback handlers.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use llmgate_core::HealthStatus;
use tracing::{debug, warn};

use crate::error::HttpError;
use crate::state::AppState;

/// `GET /api/health`
///
/// 200 when the upstream answers and the model is listed, 503 otherwise.
/// The body always carries `model_available`.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let report = state.health().report().await;

    if report.is_healthy() {
        debug!("Health check passed");
    } else {
        warn!(
            model_available = report.model_available,
            error = report.error.as_deref().unwrap_or_default(),
            "Health check failed"
        );
    }

    let status =
        StatusCode::from_u16(report.status_code()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
    (status, Json(report))
}

/// Any route not registered on the router.
pub async fn not_found(uri: Uri) -> HttpError {
    debug!(path = %uri.path(), "No route matched");
    HttpError::NotFound("Not found".to_string())
}

/// A registered route called with the wrong method.
pub async fn method_not_allowed(uri: Uri) -> HttpError {
    debug!(path = %uri.path(), "Method not allowed");
    HttpError::MethodNotAllowed("Method not allowed".to_string())
}
