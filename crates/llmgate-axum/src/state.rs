//! Shared application state type.

use std::sync::Arc;

use llmgate_core::GatewayContext;

/// Application state shared across all handlers.
///
/// The context holds no mutable state; handlers only read from it.
pub type AppState = Arc<GatewayContext>;
