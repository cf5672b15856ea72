//! Shared helpers for route-level tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use llmgate_axum::create_router;
use llmgate_core::testing::FakeBackend;
use llmgate_core::{GatewayConfig, GatewayContext};
use serde_json::Value;
use tower::ServiceExt;

/// Build a router around `backend` with short timeouts.
pub fn app_with(backend: Arc<FakeBackend>, config: GatewayConfig) -> Router {
    create_router(Arc::new(GatewayContext::new(config, backend)))
}

pub fn app(backend: Arc<FakeBackend>) -> Router {
    app_with(
        backend,
        GatewayConfig::new()
            .with_generate_timeout(Duration::from_secs(2))
            .with_probe_timeout(Duration::from_secs(2)),
    )
}

pub fn generate_request(body: impl Into<Body>) -> Request<Body> {
    Request::post("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

/// Send a request and decode the JSON response body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
