//! Gateway entry point.
//!
//! Loads `.env`, reads upstream settings from the environment, and serves
//! the HTTP API until Ctrl-C or SIGTERM.

use std::net::IpAddr;

use clap::Parser;
use llmgate_axum::{DEFAULT_LISTEN_PORT, ServerConfig, bootstrap, start_server};
use llmgate_core::GatewayConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// HTTP gateway in front of a local Ollama-compatible inference server.
#[derive(Debug, Parser)]
#[command(name = "llmgate", version, about)]
struct Cli {
    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, short, default_value_t = DEFAULT_LISTEN_PORT)]
    port: u16,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before reading config
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = GatewayConfig::from_env()?;
    let state = bootstrap(config)?;

    start_server(
        ServerConfig {
            host: cli.host,
            port: cli.port,
        },
        state,
    )
    .await
}
