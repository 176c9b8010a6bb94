use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Caller-supplied configuration for a ref dropdown and its selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    /// Whether branches can be opened to browse their commits.
    pub with_commits: bool,
    /// Whether commit browsing offers the uncommitted-changes entry.
    pub with_workspace: bool,
    /// Whether the branch/tag mode toggle is available.
    pub with_tags: bool,
    /// Number of refs requested per page.
    pub page_size: usize,
    /// Label shown when nothing is selected.
    pub empty_text: String,
    /// Text placed before the type in the selected-ref label.
    pub prefix: String,
    /// Upper bound for a single provider call, in milliseconds.
    pub fetch_timeout_ms: u64,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            with_commits: true,
            with_workspace: true,
            with_tags: true,
            page_size: 300,
            empty_text: String::new(),
            prefix: String::new(),
            fetch_timeout_ms: 30_000,
        }
    }
}

impl SelectorOptions {
    /// Options for a plain branch/tag picker: no commit browsing.
    pub fn refs_only() -> Self {
        Self {
            with_commits: false,
            with_workspace: false,
            ..Default::default()
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_ms must be at least 1".into()));
        }
        Ok(())
    }
}
