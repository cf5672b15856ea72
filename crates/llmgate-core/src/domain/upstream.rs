//! Types exchanged with the upstream backend through the port.

use serde::{Deserialize, Serialize};

use super::request::GenerationOptions;

/// Names of the models currently available upstream.
///
/// Always fetched fresh; a positive lookup says nothing about whether the
/// model is still there a moment later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCatalog {
    names: Vec<String>,
}

impl ModelCatalog {
    /// Build a catalog from model names.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive lookup of a model identifier.
    #[must_use]
    pub fn contains(&self, model: &str) -> bool {
        self.names.iter().any(|name| name == model)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Body of the upstream `POST /api/generate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamGenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always `false`: the gateway asks for one complete response.
    pub stream: bool,
    pub options: GenerationOptions,
}

impl UpstreamGenerateRequest {
    /// Build a non-streaming generation payload.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, options: GenerationOptions) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            options,
        }
    }
}

/// Raw upstream generation reply.
///
/// Kept as untyped JSON so that absent or oddly typed fields degrade to
/// defaults during reshaping instead of failing the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpstreamGeneration {
    pub body: serde_json::Value,
}

impl UpstreamGeneration {
    pub fn new(body: serde_json::Value) -> Self {
        Self { body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_exact_match() {
        let catalog = ModelCatalog::new(["llama3:8b", "deepseek-r1:7b"]);
        assert!(catalog.contains("deepseek-r1:7b"));
        assert!(!catalog.contains("deepseek-r1"));
        assert!(!catalog.contains("deepseek-r1:7B"));
        assert!(!catalog.contains("deepseek-r1:7b "));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = ModelCatalog::default();
        assert!(catalog.is_empty());
        assert!(!catalog.contains("deepseek-r1:7b"));
    }

    #[test]
    fn test_upstream_payload_shape() {
        let payload =
            UpstreamGenerateRequest::new("deepseek-r1:7b", "hello", GenerationOptions::default());
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "deepseek-r1:7b",
                "prompt": "hello",
                "stream": false,
                "options": {
                    "temperature": 0.7,
                    "top_p": 0.9,
                    "max_tokens": 2048
                }
            })
        );
    }
}
