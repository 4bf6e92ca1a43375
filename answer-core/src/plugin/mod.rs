//! Plugin contract - the interface every answer-producing unit satisfies
//!
//! ```text
//!   query ──► can_handle(query)      pure, regex-only, cheap
//!                  │ true
//!                  ▼
//!             handle(ctx, query)     may re-run the patterns to
//!                  │                 recover capture groups
//!                  ▼
//!        Ok(Some(Answer)) | Ok(None) | Err(AnswerError)
//! ```
//!
//! Built-in plugins and out-of-tree collaborators (dictionary lookups, CVE
//! fetchers, ...) implement the same trait. The registry knows nothing about
//! what a plugin does, only that it returns `Result<Option<Answer>>`.

mod matcher;

pub use matcher::PatternMatcher;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::answer::Answer;
use crate::context::QueryContext;
use crate::error::Result;

/// Introspection record for documentation tooling and `/v1/plugins`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Stable plugin name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Example queries the plugin answers
    pub examples: Vec<String>,
    /// Pattern sources, in declaration order
    pub patterns: Vec<String>,
}

/// An answer-producing unit
///
/// Implementations hold only immutable configuration; nothing computed in
/// `can_handle` may be relied upon by `handle`.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Stable identifier used for registration and debugging
    fn name(&self) -> &str;

    /// One-line description
    fn description(&self) -> &str {
        ""
    }

    /// Example queries
    fn examples(&self) -> &[&'static str] {
        &[]
    }

    /// Pattern matchers, exposed for introspection
    fn patterns(&self) -> &[PatternMatcher];

    /// Pure predicate: true if any pattern matches
    fn can_handle(&self, query: &str) -> bool {
        self.patterns().iter().any(|p| p.is_match(query))
    }

    /// Resolve a matched query into an answer, or `None` for "nothing to say"
    async fn handle(&self, ctx: &QueryContext, query: &str) -> Result<Option<Answer>>;

    /// Introspection record built from the methods above
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: self.name().to_string(),
            description: self.description().to_string(),
            examples: self.examples().iter().map(|e| e.to_string()).collect(),
            patterns: self
                .patterns()
                .iter()
                .flat_map(|p| p.sources())
                .map(str::to_string)
                .collect(),
        }
    }
}
