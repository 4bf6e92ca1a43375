//! Answer Server Binary
//!
//! HTTP server providing REST API access to Answer Core.
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (port 8430)
//! answer-server
//!
//! # Custom port, 2s deadline per query
//! ANSWER_PORT=3000 ANSWER_TIMEOUT_MS=2000 answer-server
//!
//! # Disable plugins, or load a config file
//! ANSWER_DISABLED_PLUGINS=uuid,timestamp answer-server
//! ANSWER_CONFIG=engine.json answer-server
//! ```

use answer_core::{EngineConfig, Registry};
use answer_server::{AnswerServer, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "answer_server=info,answer_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get configuration from environment
    let config = ServerConfig::from_env();

    let engine = EngineConfig::from_env()?;
    if !engine.disabled_plugins.is_empty() {
        tracing::info!("Disabled plugins: {}", engine.disabled_plugins.join(", "));
    }

    let registry = Registry::from_config(&engine)?;
    tracing::info!("Registered {} plugin(s)", registry.len());

    if let Some(timeout) = config.request_timeout {
        tracing::info!("Per-query deadline: {:?}", timeout);
    }

    tracing::info!("Starting Answer Server v{}", env!("CARGO_PKG_VERSION"));

    let server = AnswerServer::new(registry, config);
    server.run().await?;

    Ok(())
}
