//! Gateway bootstrap - the composition root.
//!
//! This module is the ONLY place where the concrete upstream client is
//! instantiated and handed to the core services.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use llmgate_core::{GatewayConfig, GatewayContext};
use llmgate_ollama::OllamaClient;
use tokio::net::TcpListener;
use tracing::info;

use crate::state::AppState;

/// Default port the gateway listens on.
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

/// Listen configuration for the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: IpAddr,
    /// Port for the HTTP server.
    pub port: u16,
}

impl ServerConfig {
    /// All interfaces on [`DEFAULT_LISTEN_PORT`].
    pub const fn with_defaults() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_LISTEN_PORT,
        }
    }

    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Build the shared application state from gateway configuration.
pub fn bootstrap(config: GatewayConfig) -> Result<AppState> {
    let client = OllamaClient::from_config(&config).context("Failed to build upstream client")?;
    Ok(Arc::new(GatewayContext::new(config, Arc::new(client))))
}

/// Start the HTTP server and block until a shutdown signal arrives.
pub async fn start_server(server: ServerConfig, state: AppState) -> Result<()> {
    let config = state.config();
    info!(upstream = %config.upstream_base_url(), "Upstream inference server");
    info!(model = %config.model, "Required model");

    let app = crate::routes::create_router(state);

    let addr = server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("llmgate listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("llmgate stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
