//! The gateway's outward response contract.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::upstream::UpstreamGeneration;
use crate::error::GenerateError;

/// Usage and timing metadata attached to a generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Model that produced the text.
    pub model: String,
    /// Token count reported upstream, 0 if absent. Passed through as sent.
    pub total_tokens: Number,
    /// Upstream `eval_time`, 0 if absent. Integer values stay integers.
    pub completion_time: Number,
}

/// A successful generation, reshaped from the upstream reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub metadata: GenerationMetadata,
}

impl GenerationResult {
    /// Reshape an upstream reply.
    ///
    /// `response` becomes `text`, `total_tokens` is copied, `eval_time`
    /// becomes `completion_time`. Missing or mistyped fields fall back to an
    /// empty string or zero.
    pub fn from_upstream(upstream: &UpstreamGeneration, model: &str) -> Self {
        let body = &upstream.body;
        Self {
            text: body["response"].as_str().unwrap_or_default().to_string(),
            metadata: GenerationMetadata {
                model: model.to_string(),
                total_tokens: number_or_zero(&body["total_tokens"]),
                completion_time: number_or_zero(&body["eval_time"]),
            },
        }
    }
}

fn number_or_zero(value: &Value) -> Number {
    match value {
        Value::Number(n) => n.clone(),
        _ => Number::from(0),
    }
}

/// Uniform response body for `POST /api/generate`.
///
/// Exactly one of `data` and `error` is present, matching `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<GenerationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GatewayResponse {
    /// `{success: true, data}`.
    pub fn success(data: GenerationResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// `{success: false, error}`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Map an orchestration outcome to a body and HTTP status code.
    pub fn from_outcome(outcome: Result<GenerationResult, GenerateError>) -> (Self, u16) {
        match outcome {
            Ok(result) => (Self::success(result), 200),
            Err(err) => {
                let status = err.status_code();
                (Self::failure(err.to_string()), status)
            }
        }
    }
}

impl From<GenerateError> for GatewayResponse {
    fn from(err: GenerateError) -> Self {
        Self::failure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reshape_full_reply() {
        let upstream = UpstreamGeneration::new(json!({
            "response": "hello",
            "total_tokens": 5,
            "eval_time": 12,
            "done": true
        }));
        let (body, status) = GatewayResponse::from_outcome(Ok(GenerationResult::from_upstream(
            &upstream,
            "deepseek-r1:7b",
        )));

        assert_eq!(status, 200);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "success": true,
                "data": {
                    "text": "hello",
                    "metadata": {
                        "model": "deepseek-r1:7b",
                        "total_tokens": 5,
                        "completion_time": 12
                    }
                }
            })
        );
    }

    #[test]
    fn test_reshape_tolerates_missing_fields() {
        let result = GenerationResult::from_upstream(&UpstreamGeneration::new(json!({})), "m");
        assert_eq!(result.text, "");
        assert_eq!(result.metadata.total_tokens, Number::from(0));
        assert_eq!(result.metadata.completion_time, Number::from(0));
    }

    #[test]
    fn test_non_integer_token_count_is_preserved() {
        let result = GenerationResult::from_upstream(
            &UpstreamGeneration::new(json!({"response": "x", "total_tokens": 5.0})),
            "m",
        );
        assert_eq!(
            serde_json::to_value(&result.metadata).unwrap()["total_tokens"],
            json!(5.0)
        );

        let result = GenerationResult::from_upstream(
            &UpstreamGeneration::new(json!({"response": "x", "total_tokens": -1})),
            "m",
        );
        assert_eq!(result.metadata.total_tokens, Number::from(-1));
    }

    #[test]
    fn test_reshape_tolerates_non_object_reply() {
        let result =
            GenerationResult::from_upstream(&UpstreamGeneration::new(json!("plain")), "m");
        assert_eq!(result.text, "");
        assert_eq!(result.metadata.model, "m");
    }

    #[test]
    fn test_fractional_completion_time_is_preserved() {
        let result = GenerationResult::from_upstream(
            &UpstreamGeneration::new(json!({"response": "x", "eval_time": 1.25})),
            "m",
        );
        assert_eq!(
            serde_json::to_value(&result.metadata).unwrap()["completion_time"],
            json!(1.25)
        );
    }

    #[test]
    fn test_failure_shape() {
        let (body, status) = GatewayResponse::from_outcome(Err(GenerateError::ModelUnavailable));
        assert_eq!(status, 503);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"success": false, "error": "Model is not available"})
        );
    }

    #[test]
    fn test_from_error() {
        let body = GatewayResponse::from(GenerateError::Timeout);
        assert!(!body.success);
        assert!(body.data.is_none());
        assert_eq!(body.error.as_deref(), Some("Model request timed out"));
    }
}
