//! Formatter configuration, as decoded from a route definition.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Result type for configuration decoding.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while decoding a [`FormatterConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON or has the wrong shape.
    #[error("invalid formatter config: {0}")]
    Json(#[from] serde_json::Error),
}

/// How an inclusion list is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InclusionStrategy {
    #[default]
    /// Delete everything not reachable through the compiled path tree.
    Prune,
    /// Copy each declared path into a fresh object.
    Rebuild,
}

/// The shaping rules of one route.
///
/// Every field is optional. An empty `target` disables extraction, an empty
/// `group` disables grouping, and a non-empty `whitelist` disables the
/// `blacklist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Top-level key whose object replaces the whole response data.
    pub target: String,
    /// Dotted paths to keep.
    #[serde(alias = "include")]
    pub whitelist: Vec<String>,
    /// Dotted paths to drop. At most two segments are honored.
    #[serde(alias = "exclude")]
    pub blacklist: Vec<String>,
    /// Key to nest the whole result under.
    pub group: String,
    /// Top-level renames, from old name to new name.
    #[serde(alias = "rename")]
    pub mapping: HashMap<String, String>,
    pub inclusion_strategy: InclusionStrategy,
}

impl FormatterConfig {
    /// Decodes a configuration from JSON text.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decodes a configuration from an already-parsed JSON value.
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_whitelist<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blacklist<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Adds a single rename. Repeated calls accumulate.
    pub fn with_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.mapping.insert(from.into(), to.into());
        self
    }

    pub fn with_inclusion_strategy(mut self, strategy: InclusionStrategy) -> Self {
        self.inclusion_strategy = strategy;
        self
    }
}
