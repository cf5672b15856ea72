//! HTTP client for an Ollama-compatible upstream.

use std::time::Duration;

use async_trait::async_trait;
use llmgate_core::{
    GatewayConfig, InferenceBackend, ModelCatalog, UpstreamError, UpstreamGenerateRequest,
    UpstreamGeneration,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::classify;
use crate::models::{TagsResponse, VersionResponse};

/// Upstream client implementing [`InferenceBackend`].
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    probe_timeout: Duration,
    generate_timeout: Duration,
}

impl OllamaClient {
    /// Create a client for `base_url` (e.g. `http://localhost:11434`).
    pub fn new(
        base_url: impl Into<String>,
        probe_timeout: Duration,
        generate_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .user_agent(concat!("llmgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            probe_timeout,
            generate_timeout,
        })
    }

    /// Create a client from the gateway configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.upstream_base_url(),
            config.probe_timeout,
            config.generate_timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a prepared request and decode a successful JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = request.send().await.map_err(|e| classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Upstream returned non-success status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| classify(&e))?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn list_models(&self) -> Result<ModelCatalog, UpstreamError> {
        let url = self.url("/api/tags");
        debug!(url = %url, "GET /api/tags");

        let tags: TagsResponse = self
            .send_json(self.client.get(&url).timeout(self.probe_timeout))
            .await?;
        Ok(tags.into())
    }

    async fn generate(
        &self,
        request: &UpstreamGenerateRequest,
    ) -> Result<UpstreamGeneration, UpstreamError> {
        let url = self.url("/api/generate");
        debug!(url = %url, model = %request.model, "POST /api/generate");

        let body: serde_json::Value = self
            .send_json(
                self.client
                    .post(&url)
                    .json(request)
                    .timeout(self.generate_timeout),
            )
            .await?;
        Ok(UpstreamGeneration::new(body))
    }

    async fn version(&self) -> Result<String, UpstreamError> {
        let url = self.url("/api/version");
        debug!(url = %url, "GET /api/version");

        let version: VersionResponse = self
            .send_json(self.client.get(&url).timeout(self.probe_timeout))
            .await?;
        Ok(version.into_version())
    }
}
