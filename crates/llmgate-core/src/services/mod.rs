//! Request-scoped gateway services.
//!
//! - [`AvailabilityChecker`] answers "is the required model loaded upstream?"
//! - [`GenerationOrchestrator`] validates, gates and forwards a generation
//! - [`HealthReporter`] combines a version probe with the availability check
//!
//! All three hold an `Arc<dyn InferenceBackend>` and no mutable state, so
//! they are cheap to clone and safe to share across concurrent requests.

mod availability;
mod generation;
mod health;

pub use availability::AvailabilityChecker;
pub use generation::GenerationOrchestrator;
pub use health::HealthReporter;
