//! Engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnswerError, Result};
use crate::plugins::BUILTIN_NAMES;
use crate::registry::DEFAULT_MAX_QUERY_LENGTH;

/// Path of a JSON config file
pub const ENV_CONFIG: &str = "ANSWER_CONFIG";
/// Comma-separated plugin names to disable
pub const ENV_DISABLED_PLUGINS: &str = "ANSWER_DISABLED_PLUGINS";
/// Maximum accepted query length in characters
pub const ENV_MAX_QUERY_LENGTH: &str = "ANSWER_MAX_QUERY_LENGTH";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Built-in plugins that are not registered
    #[serde(default)]
    pub disabled_plugins: Vec<String>,

    /// Queries longer than this (after trimming) are never dispatched
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

fn default_max_query_length() -> usize { DEFAULT_MAX_QUERY_LENGTH }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            disabled_plugins: Vec::new(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| AnswerError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json_str(&json)
    }

    /// Build from the process environment
    ///
    /// `ANSWER_CONFIG` names a file to start from; the other variables
    /// override individual fields.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(ENV_CONFIG) {
            Some(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };

        if let Some(list) = lookup(ENV_DISABLED_PLUGINS) {
            config.disabled_plugins = list
                .split(',')
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect();
        }

        if let Some(raw) = lookup(ENV_MAX_QUERY_LENGTH) {
            config.max_query_length = raw.trim().parse().map_err(|_| AnswerError::Config {
                reason: format!("{} must be a positive integer, got {:?}", ENV_MAX_QUERY_LENGTH, raw),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check field constraints
    pub fn validate(&self) -> Result<()> {
        if self.max_query_length == 0 {
            return Err(AnswerError::Config {
                reason: "max_query_length must be greater than zero".to_string(),
            });
        }

        for name in &self.disabled_plugins {
            if !BUILTIN_NAMES.contains(&name.as_str()) {
                tracing::warn!(plugin = %name, "disabled plugin is not a built-in");
            }
        }

        Ok(())
    }

    /// True unless `name` is listed in `disabled_plugins`
    pub fn is_enabled(&self, name: &str) -> bool {
        !self
            .disabled_plugins
            .iter()
            .any(|disabled| disabled.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_query_length, 512);
        assert!(config.disabled_plugins.is_empty());
        assert!(config.is_enabled("calculator"));
    }

    #[test]
    fn test_json_fills_missing_fields() {
        let config = EngineConfig::from_json_str(r#"{"disabled_plugins": ["uuid"]}"#).unwrap();
        assert_eq!(config.max_query_length, 512);
        assert!(!config.is_enabled("uuid"));
        assert!(!config.is_enabled("UUID"));
        assert!(config.is_enabled("hash"));

        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_json_errors() {
        let err = EngineConfig::from_json_str("{not json").unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");

        let err = EngineConfig::from_json_str(r#"{"max_query_length": 0}"#).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_env_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            (ENV_DISABLED_PLUGINS, " Hash, base64 ,,"),
            (ENV_MAX_QUERY_LENGTH, "64"),
        ]))
        .unwrap();
        assert_eq!(config.disabled_plugins, vec!["hash", "base64"]);
        assert_eq!(config.max_query_length, 64);

        let err = EngineConfig::from_lookup(lookup(&[(ENV_MAX_QUERY_LENGTH, "lots")])).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_config_file() {
        let path = std::env::temp_dir().join(format!("answer-config-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"max_query_length": 100}"#).unwrap();

        let config = EngineConfig::from_lookup(lookup(&[
            (ENV_CONFIG, path.to_str().unwrap()),
            (ENV_DISABLED_PLUGINS, "timestamp"),
        ]))
        .unwrap();
        assert_eq!(config.max_query_length, 100);
        assert!(!config.is_enabled("timestamp"));

        std::fs::remove_file(&path).unwrap();

        let err = EngineConfig::from_file(&path).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
