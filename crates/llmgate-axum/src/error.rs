//! Axum-specific error types and mappings.
//!
//! Every error leaves the gateway as `{"success": false, "error": "..."}`
//! with a status chosen from the variant.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use llmgate_core::{GatewayResponse, GenerateError};
use thiserror::Error;

/// Seconds a client should wait before retrying a 503.
const RETRY_AFTER_SECS: &str = "5";

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("{0}")]
    BadRequest(String),

    /// Route does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Route exists but not for this method.
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Request body could not be read within the configured limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Service unavailable (required model not loaded upstream).
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Internal server error, including upstream timeouts and transport errors.
    #[error("{0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(GatewayResponse::failure(self.to_string()))).into_response();

        if status == StatusCode::SERVICE_UNAVAILABLE {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
        }

        response
    }
}

impl From<BytesRejection> for HttpError {
    fn from(rejection: BytesRejection) -> Self {
        let message = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(message)
        } else {
            Self::BadRequest(message)
        }
    }
}

impl From<GenerateError> for HttpError {
    fn from(err: GenerateError) -> Self {
        let message = err.to_string();
        match StatusCode::from_u16(err.status_code()) {
            Ok(StatusCode::BAD_REQUEST) => Self::BadRequest(message),
            Ok(StatusCode::SERVICE_UNAVAILABLE) => Self::ServiceUnavailable(message),
            _ => Self::Internal(message),
        }
    }
}
