//! Inbound generation request and its parameters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GenerateError;

/// Sampling temperature used when the caller does not send one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Nucleus sampling threshold used when the caller does not send one.
pub const DEFAULT_TOP_P: f64 = 0.9;

/// Generation length limit used when the caller does not send one.
pub const DEFAULT_MAX_TOKENS: u64 = 2048;

/// Generation parameters as supplied by the caller.
///
/// `None` means "not sent"; see [`GenerationParameters::resolve`] for the
/// defaults that replace it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Top-p sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
}

impl GenerationParameters {
    /// Substitute defaults for every parameter the caller left unset.
    #[must_use]
    pub fn resolve(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: self.top_p.unwrap_or(DEFAULT_TOP_P),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }
}

/// Fully resolved generation options, as sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationParameters::default().resolve()
    }
}

/// A validated generation request.
///
/// Construction through [`GenerationRequest::from_json_slice`] or
/// [`GenerationRequest::from_value`] guarantees a non-empty prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Prompt text, never empty.
    pub prompt: String,
    /// Caller-supplied parameters.
    pub parameters: GenerationParameters,
}

impl GenerationRequest {
    /// Build a request from a prompt and parameters.
    ///
    /// Rejects an empty prompt.
    pub fn new(
        prompt: impl Into<String>,
        parameters: GenerationParameters,
    ) -> Result<Self, GenerateError> {
        let prompt = prompt.into();
        if prompt.is_empty() {
            return Err(GenerateError::validation("Prompt is required"));
        }
        Ok(Self { prompt, parameters })
    }

    /// Parse and validate a raw JSON request body.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, GenerateError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            GenerateError::validation(format!("Request body is not valid JSON: {e}"))
        })?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON body.
    ///
    /// The body must be an object with a non-empty string `prompt`.
    /// `temperature`, `top_p` and `max_tokens` are read from the top level;
    /// other keys are ignored. A `null` parameter counts as unset.
    pub fn from_value(value: Value) -> Result<Self, GenerateError> {
        let Value::Object(body) = value else {
            return Err(GenerateError::validation(
                "Request body must be a JSON object",
            ));
        };

        let prompt = match body.get("prompt") {
            None | Some(Value::Null) => {
                return Err(GenerateError::validation("Prompt is required"));
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(GenerateError::validation("Prompt must be a string")),
        };

        let parameters = GenerationParameters {
            temperature: float_param(&body, "temperature")?,
            top_p: float_param(&body, "top_p")?,
            max_tokens: integer_param(&body, "max_tokens")?,
        };

        Self::new(prompt, parameters)
    }
}

fn float_param(body: &Map<String, Value>, key: &str) -> Result<Option<f64>, GenerateError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            GenerateError::validation(format!("Invalid value for '{key}': expected a number"))
        }),
    }
}

fn integer_param(body: &Map<String, Value>, key: &str) -> Result<Option<u64>, GenerateError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
            GenerateError::validation(format!(
                "Invalid value for '{key}': expected a non-negative integer"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_message(result: Result<GenerationRequest, GenerateError>) -> String {
        match result {
            Err(GenerateError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_resolve() {
        let options = GenerationParameters::default().resolve();
        assert!((options.temperature - 0.7).abs() < f64::EPSILON);
        assert!((options.top_p - 0.9).abs() < f64::EPSILON);
        assert_eq!(options.max_tokens, 2048);
        assert_eq!(GenerationOptions::default(), options);
    }

    #[test]
    fn test_partial_parameters_keep_other_defaults() {
        let options = GenerationParameters {
            temperature: Some(0.1),
            ..Default::default()
        }
        .resolve();
        assert!((options.temperature - 0.1).abs() < f64::EPSILON);
        assert!((options.top_p - 0.9).abs() < f64::EPSILON);
        assert_eq!(options.max_tokens, 2048);
    }

    #[test]
    fn test_prompt_only_body() {
        let req = GenerationRequest::from_json_slice(br#"{"prompt": "hi"}"#).unwrap();
        assert_eq!(req.prompt, "hi");
        assert_eq!(req.parameters, GenerationParameters::default());
    }

    #[test]
    fn test_body_with_parameters() {
        let req = GenerationRequest::from_value(json!({
            "prompt": "hi",
            "temperature": 1.2,
            "top_p": 0.5,
            "max_tokens": 64,
            "unrelated": true
        }))
        .unwrap();

        assert_eq!(req.parameters.temperature, Some(1.2));
        assert_eq!(req.parameters.top_p, Some(0.5));
        assert_eq!(req.parameters.max_tokens, Some(64));
    }

    #[test]
    fn test_integer_temperature_is_accepted() {
        let req = GenerationRequest::from_value(json!({"prompt": "hi", "temperature": 1})).unwrap();
        assert_eq!(req.parameters.temperature, Some(1.0));
    }

    #[test]
    fn test_null_parameter_counts_as_unset() {
        let req =
            GenerationRequest::from_value(json!({"prompt": "hi", "top_p": null})).unwrap();
        assert_eq!(req.parameters.top_p, None);
    }

    #[test]
    fn test_missing_prompt() {
        let msg = validation_message(GenerationRequest::from_value(json!({"temperature": 0.2})));
        assert_eq!(msg, "Prompt is required");
    }

    #[test]
    fn test_empty_prompt() {
        let msg = validation_message(GenerationRequest::from_value(json!({"prompt": ""})));
        assert_eq!(msg, "Prompt is required");
    }

    #[test]
    fn test_null_prompt() {
        let msg = validation_message(GenerationRequest::from_value(json!({"prompt": null})));
        assert_eq!(msg, "Prompt is required");
    }

    #[test]
    fn test_non_string_prompt() {
        let msg = validation_message(GenerationRequest::from_value(json!({"prompt": 42})));
        assert_eq!(msg, "Prompt must be a string");
    }

    #[test]
    fn test_non_object_body() {
        let msg = validation_message(GenerationRequest::from_value(json!(["prompt"])));
        assert_eq!(msg, "Request body must be a JSON object");
    }

    #[test]
    fn test_invalid_json() {
        let msg = validation_message(GenerationRequest::from_json_slice(b"{prompt: "));
        assert!(msg.starts_with("Request body is not valid JSON"));
    }

    #[test]
    fn test_wrongly_typed_parameters() {
        let msg = validation_message(GenerationRequest::from_value(
            json!({"prompt": "hi", "temperature": "hot"}),
        ));
        assert_eq!(msg, "Invalid value for 'temperature': expected a number");

        let msg = validation_message(GenerationRequest::from_value(
            json!({"prompt": "hi", "max_tokens": -5}),
        ));
        assert_eq!(
            msg,
            "Invalid value for 'max_tokens': expected a non-negative integer"
        );

        let msg = validation_message(GenerationRequest::from_value(
            json!({"prompt": "hi", "max_tokens": 1.5}),
        ));
        assert!(msg.contains("max_tokens"));
    }

    #[test]
    fn test_new_rejects_empty_prompt() {
        assert!(GenerationRequest::new("", GenerationParameters::default()).is_err());
        assert!(GenerationRequest::new(" ", GenerationParameters::default()).is_ok());
    }
}
