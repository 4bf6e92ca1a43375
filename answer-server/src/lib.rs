//! Answer Server - HTTP wrapper for Answer Core
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   AnswerServer                      │
//! │  ┌─────────────────────────────────────────────┐    │
//! │  │          answer-core::Registry              │    │
//! │  │         (all logic lives here)              │    │
//! │  └─────────────────────────────────────────────┘    │
//! │                        │                            │
//! │        ┌───────────────┼───────────────┐            │
//! │        ▼               ▼               ▼            │
//! │     /health       /v1/answer      /v1/plugins       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The server is a thin wrapper. The registry is read-only, so handlers
//! share it through an `Arc` without locking.

pub mod routes;
mod config;

pub use config::{ServerConfig, ServerConfigBuilder, DEFAULT_PORT, ENV_TIMEOUT_MS};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use answer_core::{QueryContext, Registry};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
pub struct AppState {
    /// Plugin registry (wraps answer-core)
    pub registry: Registry,
    /// Deadline given to each query, if any
    pub request_timeout: Option<Duration>,
}

impl AppState {
    /// Create new app state with the given registry
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            request_timeout: None,
        }
    }

    /// Fresh query context carrying the configured deadline
    pub fn context(&self) -> QueryContext {
        match self.request_timeout {
            Some(timeout) => QueryContext::new().with_timeout(timeout),
            None => QueryContext::new(),
        }
    }
}

/// Answer HTTP Server
///
/// # Example
///
/// ```rust,ignore
/// use answer_core::Registry;
/// use answer_server::{AnswerServer, ServerConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let registry = Registry::with_builtins().unwrap();
///     let config = ServerConfig::builder().port(8430).build();
///
///     AnswerServer::new(registry, config).run().await.unwrap();
/// }
/// ```
pub struct AnswerServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl AnswerServer {
    /// Create a new server wrapping the given registry
    pub fn new(registry: Registry, config: ServerConfig) -> Self {
        let state = AppState {
            request_timeout: config.request_timeout,
            ..AppState::new(registry)
        };
        Self {
            state: Arc::new(state),
            config,
        }
    }

    /// Build the Axum router with all routes and layers
    pub fn router(&self) -> Router {
        let router =
            routes::create_router(Arc::clone(&self.state)).layer(TraceLayer::new_for_http());

        if self.config.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Get the socket address for the server
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.config.port))
    }

    /// Run the server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = self.addr();

        tracing::info!("Answer Server listening on http://{}", addr);
        tracing::info!("Plugins: {}", self.state.registry.plugin_names().join(", "));
        tracing::info!("Endpoints:");
        tracing::info!("  GET  /health");
        tracing::info!("  GET  /v1/answer?q=");
        tracing::info!("  POST /v1/answer");
        tracing::info!("  GET  /v1/plugins");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
