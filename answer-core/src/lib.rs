//! # Answer Core - Direct-Answer Resolution Engine
//!
//! Turns a free-text search query into a structured instant answer (an
//! HTML fragment plus machine-readable fields) without consulting an index.
//!
//! - **Plugin contract**: every answer-producing unit declares ordered
//!   regex patterns and an async `handle`
//! - **Registry**: ordered, first-match-wins dispatch with no scoring
//! - **Evaluator**: arithmetic with precedence, powers and percentages
//! - **Converter**: length, mass, volume, time, data and temperature units
//!
//! ## Example
//!
//! ```rust
//! use answer_core::{QueryContext, Registry};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = Registry::with_builtins().unwrap();
//! let ctx = QueryContext::new();
//!
//! let answer = registry.resolve(&ctx, "2 + 3 * 4").await.unwrap().unwrap();
//! assert_eq!(answer.kind.as_str(), "math");
//! assert_eq!(answer.data["formatted"], "14");
//!
//! let answer = registry.resolve(&ctx, "1 gigabytes to megabytes").await.unwrap().unwrap();
//! assert_eq!(answer.data["formatted"], "1024");
//!
//! assert!(registry.resolve(&ctx, "who wrote hamlet").await.unwrap().is_none());
//! # }
//! ```
//!
//! ## Writing a plugin
//!
//! Collaborators implement [`Plugin`] and are registered after (or before)
//! the built-ins. Registration order is the only precedence there is.
//!
//! ```rust
//! use answer_core::{async_trait, Answer, AnswerKind, PatternMatcher, Plugin, QueryContext, Result};
//!
//! struct Define {
//!     patterns: Vec<PatternMatcher>,
//! }
//!
//! #[async_trait]
//! impl Plugin for Define {
//!     fn name(&self) -> &str {
//!         "define"
//!     }
//!
//!     fn patterns(&self) -> &[PatternMatcher] {
//!         &self.patterns
//!     }
//!
//!     async fn handle(&self, ctx: &QueryContext, query: &str) -> Result<Option<Answer>> {
//!         ctx.check()?;
//!         let Some(word) = self.patterns[0].first_arg(query) else {
//!             return Ok(None);
//!         };
//!         Ok(Some(Answer::new(AnswerKind::Lookup, query, word, "...")))
//!     }
//! }
//! ```

pub mod answer;
pub mod calc;
pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod plugin;
pub mod plugins;
pub mod registry;

pub use async_trait::async_trait;

pub use answer::{escape_html, Answer, AnswerKind};
pub use calc::{evaluate, format_number, Evaluator};
pub use config::EngineConfig;
pub use context::{normalize_query, QueryContext};
pub use convert::{convert, normalize_unit, Category, UnitConverter};
pub use error::{AnswerError, ErrorCategory, ErrorResponse, Result};
pub use plugin::{PatternMatcher, Plugin, PluginInfo};
pub use registry::Registry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end() {
        let registry = Registry::with_builtins().unwrap();
        let ctx = QueryContext::new();

        let answer = registry.resolve(&ctx, "(2 + 3) * 4").await.unwrap().unwrap();
        assert_eq!(answer.kind, AnswerKind::Math);
        assert_eq!(answer.data["result"], 20.0);

        let answer = registry.resolve(&ctx, "what is 10 km in miles").await.unwrap().unwrap();
        assert_eq!(answer.kind, AnswerKind::Convert);

        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["kind"], "convert");
        assert!(json.get("sourceURL").is_none());
    }
}
