//! Ollama wire types.
//!
//! Only the fields the gateway reads are modelled; everything else in the
//! upstream payloads is ignored.

use llmgate_core::ModelCatalog;
use serde::Deserialize;

/// Response from `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TagsResponse {
    /// Absent list means no models are loaded.
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

/// A single entry in the tags listing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TagEntry {
    pub name: String,
}

impl From<TagsResponse> for ModelCatalog {
    fn from(tags: TagsResponse) -> Self {
        Self::new(tags.models.into_iter().map(|m| m.name))
    }
}

/// Response from `GET /api/version`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VersionResponse {
    #[serde(default)]
    pub version: Option<String>,
}

impl VersionResponse {
    /// Reported version, or `"unknown"` when the field is missing.
    pub fn into_version(self) -> String {
        self.version.unwrap_or_else(|| "unknown".to_string())
    }
}
