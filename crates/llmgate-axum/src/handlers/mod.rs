//! HTTP handlers for the gateway.

pub mod generate;
pub mod health;
