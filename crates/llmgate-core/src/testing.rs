//! In-memory test double for [`InferenceBackend`].
//!
//! Available to this crate's tests and, through the `test-utils` feature,
//! to other crates' tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::DEFAULT_MODEL;
use crate::domain::{ModelCatalog, UpstreamGenerateRequest, UpstreamGeneration};
use crate::ports::{InferenceBackend, UpstreamError};

/// A fake backend that returns canned responses and counts calls.
///
/// By default it lists [`DEFAULT_MODEL`], answers every generation with
/// `{"response": "fake response"}` and reports version `0.5.7`.
pub struct FakeBackend {
    models: Result<Vec<String>, UpstreamError>,
    generation: Result<serde_json::Value, UpstreamError>,
    version: Result<String, UpstreamError>,
    list_delay: Option<Duration>,
    generate_delay: Option<Duration>,
    version_delay: Option<Duration>,
    list_calls: AtomicUsize,
    generate_calls: AtomicUsize,
    version_calls: AtomicUsize,
    last_generate: Mutex<Option<UpstreamGenerateRequest>>,
}

impl FakeBackend {
    /// Create a fake backend with the default canned responses.
    pub fn new() -> Self {
        Self {
            models: Ok(vec![DEFAULT_MODEL.to_string()]),
            generation: Ok(serde_json::json!({ "response": "fake response" })),
            version: Ok("0.5.7".to_string()),
            list_delay: None,
            generate_delay: None,
            version_delay: None,
            list_calls: AtomicUsize::new(0),
            generate_calls: AtomicUsize::new(0),
            version_calls: AtomicUsize::new(0),
            last_generate: Mutex::new(None),
        }
    }

    /// Replace the model catalog.
    #[must_use]
    pub fn with_models(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.models = Ok(names.into_iter().map(Into::into).collect());
        self
    }

    /// Make the catalog query fail.
    #[must_use]
    pub fn with_models_error(mut self, err: UpstreamError) -> Self {
        self.models = Err(err);
        self
    }

    /// Replace the raw generation reply.
    #[must_use]
    pub fn with_generation(mut self, body: serde_json::Value) -> Self {
        self.generation = Ok(body);
        self
    }

    /// Make the generation call fail.
    #[must_use]
    pub fn with_generation_error(mut self, err: UpstreamError) -> Self {
        self.generation = Err(err);
        self
    }

    /// Replace the reported version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Ok(version.into());
        self
    }

    /// Make the version probe fail.
    #[must_use]
    pub fn with_version_error(mut self, err: UpstreamError) -> Self {
        self.version = Err(err);
        self
    }

    /// Delay every catalog query.
    #[must_use]
    pub const fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Delay every generation call.
    #[must_use]
    pub const fn with_generate_delay(mut self, delay: Duration) -> Self {
        self.generate_delay = Some(delay);
        self
    }

    /// Delay every version probe.
    #[must_use]
    pub const fn with_version_delay(mut self, delay: Duration) -> Self {
        self.version_delay = Some(delay);
        self
    }

    pub fn list_models_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn version_calls(&self) -> usize {
        self.version_calls.load(Ordering::SeqCst)
    }

    /// The payload of the most recent generation call, if any.
    pub fn last_generate_request(&self) -> Option<UpstreamGenerateRequest> {
        self.last_generate.lock().unwrap().clone()
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

async fn pause(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl InferenceBackend for FakeBackend {
    async fn list_models(&self) -> Result<ModelCatalog, UpstreamError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        pause(self.list_delay).await;
        self.models.clone().map(ModelCatalog::new)
    }

    async fn generate(
        &self,
        request: &UpstreamGenerateRequest,
    ) -> Result<UpstreamGeneration, UpstreamError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_generate.lock().unwrap() = Some(request.clone());
        pause(self.generate_delay).await;
        self.generation.clone().map(UpstreamGeneration::new)
    }

    async fn version(&self) -> Result<String, UpstreamError> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        pause(self.version_delay).await;
        self.version.clone()
    }
}
