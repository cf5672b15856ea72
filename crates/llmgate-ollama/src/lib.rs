#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod error;
mod models;

// ============================================================================
// Public API
// ============================================================================

pub use client::OllamaClient;

// Silence unused dev-dependency warnings (used by integration tests)
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use tokio_test as _;
