//! Search client configuration.
//!
//! Credentials for the hosted index come from a JSON file, the environment,
//! or both (environment wins). The CLI layers its own flags on top.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::types::CollectionType;

pub const ENV_APP_ID: &str = "CTP_ALGOLIA_APP_ID";
pub const ENV_SEARCH_KEY: &str = "CTP_ALGOLIA_SEARCH_KEY";
pub const ENV_INDEX_PREFIX: &str = "CTP_ALGOLIA_INDEX_PREFIX";

/// Characters kept when a page has no snippet and its body gets truncated.
pub const DEFAULT_EXCERPT_LENGTH: usize = 30;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub search_key: String,
    /// Prepended to each collection tag to form the index name.
    #[serde(default)]
    pub index_prefix: String,
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_excerpt_length() -> usize {
    DEFAULT_EXCERPT_LENGTH
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            search_key: String::new(),
            index_prefix: String::new(),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SearchConfig {
    pub fn new(app_id: impl Into<String>, search_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            search_key: search_key.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config file. Not validated; call `validate()` once all
    /// overrides are applied.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content)
            .map_err(|e| SearchError::Config(format!("invalid config {}: {}", path.display(), e)))
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Overlay values found by `lookup` (keyed by the `ENV_*` names).
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(app_id) = non_empty(ENV_APP_ID) {
            self.app_id = app_id;
        }
        if let Some(key) = non_empty(ENV_SEARCH_KEY) {
            self.search_key = key;
        }
        if let Some(prefix) = non_empty(ENV_INDEX_PREFIX) {
            self.index_prefix = prefix;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(SearchError::Config(format!(
                "missing application id (set {} or appId)",
                ENV_APP_ID
            )));
        }
        if self.search_key.trim().is_empty() {
            return Err(SearchError::Config(format!(
                "missing search key (set {} or searchKey)",
                ENV_SEARCH_KEY
            )));
        }
        if !self.app_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SearchError::Config(format!(
                "application id '{}' must be alphanumeric",
                self.app_id
            )));
        }
        if self.timeout_secs == 0 {
            return Err(SearchError::Config("timeoutSecs must be positive".to_string()));
        }
        Ok(())
    }

    /// Name of the hosted index backing `collection`.
    pub fn index_name(&self, collection: CollectionType) -> String {
        format!("{}{}", self.index_prefix, collection.as_str())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
