//! Plugin Registry - ordered, first-match-wins dispatch
//!
//! ```text
//!   raw query ──► trim ──► empty / too long? ──► None
//!                              │
//!                              ▼
//!        for plugin in registration order:
//!            can_handle(query)? ── no ──► next
//!                 │ yes
//!                 ▼
//!            handle(ctx, query) ──► returned verbatim, loop ends
//! ```
//!
//! There is no scoring or fallthrough. Once a plugin claims a query its
//! result is final, including `None` and errors.

use std::fmt;
use std::sync::Arc;

use crate::answer::Answer;
use crate::config::EngineConfig;
use crate::context::{normalize_query, QueryContext};
use crate::error::Result;
use crate::plugin::{Plugin, PluginInfo};
use crate::plugins::builtins;

/// Default maximum query length in characters
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 512;

/// Ordered collection of plugins
///
/// Read-only once built; share it across tasks behind an `Arc`.
#[derive(Clone)]
pub struct Registry {
    plugins: Vec<Arc<dyn Plugin>>,
    max_query_length: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("plugins", &self.plugin_names())
            .field("max_query_length", &self.max_query_length)
            .finish()
    }
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
        }
    }

    /// Registry with every built-in plugin in the documented order
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for plugin in builtins()? {
            registry.register_arc(plugin);
        }
        Ok(registry)
    }

    /// Registry with the enabled built-ins and the configured limits
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let mut registry = Self::new().with_max_query_length(config.max_query_length);
        for plugin in builtins()? {
            if config.is_enabled(plugin.name()) {
                registry.register_arc(plugin);
            } else {
                tracing::debug!(plugin = plugin.name(), "plugin disabled by configuration");
            }
        }
        Ok(registry)
    }

    /// Set the maximum query length (characters, after trimming)
    pub fn with_max_query_length(mut self, max: usize) -> Self {
        self.max_query_length = max;
        self
    }

    pub fn max_query_length(&self) -> usize {
        self.max_query_length
    }

    /// Append a plugin; it is consulted after every plugin already registered
    pub fn register(&mut self, plugin: impl Plugin + 'static) {
        self.register_arc(Arc::new(plugin));
    }

    /// Append a shared plugin
    pub fn register_arc(&mut self, plugin: Arc<dyn Plugin>) {
        if self.plugins.iter().any(|p| p.name() == plugin.name()) {
            tracing::warn!(plugin = plugin.name(), "plugin name registered twice; the first one wins");
        }
        self.plugins.push(plugin);
    }

    /// The plugin that would receive `query`, if any
    pub fn find_handler(&self, query: &str) -> Option<&dyn Plugin> {
        let query = self.accept(query)?;
        self.plugins
            .iter()
            .find(|p| p.can_handle(query))
            .map(|p| p.as_ref())
    }

    /// Resolve a query into an answer
    ///
    /// Returns `Ok(None)` for empty or overlong queries and when no plugin
    /// recognizes the query. Otherwise the first plugin whose `can_handle`
    /// is true is called exactly once and its result is returned untouched.
    pub async fn resolve(&self, ctx: &QueryContext, query: &str) -> Result<Option<Answer>> {
        let Some(query) = self.accept(query) else {
            return Ok(None);
        };

        let Some(plugin) = self.plugins.iter().find(|p| p.can_handle(query)) else {
            tracing::trace!(request_id = ctx.request_id(), query, "no plugin matched");
            return Ok(None);
        };

        tracing::debug!(
            request_id = ctx.request_id(),
            plugin = plugin.name(),
            "dispatching query"
        );

        let result = plugin.handle(ctx, query).await;
        if let Err(err) = &result {
            tracing::debug!(
                request_id = ctx.request_id(),
                plugin = plugin.name(),
                code = err.error_code(),
                "plugin returned an error"
            );
        }
        result
    }

    /// Names in registration order
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Introspection records in registration order
    pub fn list(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(|p| p.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Trimmed query if it is eligible for dispatch
    fn accept<'q>(&self, raw: &'q str) -> Option<&'q str> {
        let query = normalize_query(raw)?;
        if query.chars().count() > self.max_query_length {
            tracing::debug!(
                length = query.chars().count(),
                max = self.max_query_length,
                "query too long, not dispatched"
            );
            return None;
        }
        Some(query)
    }
}
