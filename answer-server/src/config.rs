//! Server configuration

use std::time::Duration;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8430;

/// Environment variable holding the per-request deadline in milliseconds
pub const ENV_TIMEOUT_MS: &str = "ANSWER_TIMEOUT_MS";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: bool,
    /// Deadline attached to every query context; plugins that wait on
    /// something give up with `Cancelled` (408) once it passes
    pub request_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Create a new configuration builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Read `ANSWER_PORT` and `ANSWER_TIMEOUT_MS`, ignoring unparsable values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] over an arbitrary lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = Self::builder();
        if let Some(port) = lookup("ANSWER_PORT").and_then(|p| p.trim().parse().ok()) {
            builder = builder.port(port);
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS).and_then(|v| v.trim().parse::<u64>().ok()) {
            if ms > 0 {
                builder = builder.request_timeout(Duration::from_millis(ms));
            }
        }
        builder.build()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    cors_enabled: Option<bool>,
    request_timeout: Option<Duration>,
}

impl ServerConfigBuilder {
    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors_enabled = Some(enabled);
        self
    }

    /// Give every query this long before its context expires
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            cors_enabled: self.cors_enabled.unwrap_or(true),
            request_timeout: self.request_timeout,
        }
    }
}
