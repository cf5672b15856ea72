//! Text generation handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, header};
use llmgate_core::GatewayResponse;
use tracing::{debug, info};

use crate::error::HttpError;
use crate::state::AppState;

/// `POST /api/generate`
///
/// The body is taken raw so every validation failure uses the gateway's
/// 400 envelope instead of axum's extractor rejections. The route carries no
/// body size limit.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GatewayResponse>, HttpError> {
    info!("Received generation request");
    let body = body?;

    if !has_json_content_type(&headers) {
        debug!("Rejected generation request without a JSON content type");
        return Err(HttpError::BadRequest("Request must be JSON".to_string()));
    }

    let result = state.orchestrator().generate_from_json(&body).await?;
    Ok(Json(GatewayResponse::success(result)))
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json"
        || mime
            .strip_prefix("application/")
            .is_some_and(|sub| sub.ends_with("+json"))
}
