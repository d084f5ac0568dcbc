//! Configuration types for a wordscout run.
//!
//! Every section has defaults, so an empty file (or no file) is a valid
//! configuration. Command-line flags override file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wordscout_search::{FetchConfig, SearchConfig};

use crate::error::{Result, WordscoutError};
use crate::mode::ExtractionMode;
use crate::words::StopList;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordscoutConfig {
    /// Search provider settings.
    pub search: SearchConfig,
    /// Result page download settings.
    pub fetch: FetchSettings,
    /// Stop-lists per extraction mode.
    pub filter: FilterConfig,
    /// What to count and how much to print.
    pub report: ReportConfig,
}

/// Result page download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// User-Agent header sent with every page request.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// How many pages are fetched and processed at once. 1 is strictly
    /// sequential.
    pub concurrency: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        let client = FetchConfig::default();
        Self {
            user_agent: client.user_agent,
            timeout_seconds: client.timeout_seconds,
            concurrency: 1,
        }
    }
}

impl FetchSettings {
    /// The HTTP client part of these settings.
    pub fn client_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }
}

/// Stop-lists for body text and meta tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Applied to body text.
    pub body: StopList,
    /// Applied to meta tags.
    pub meta: StopList,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            body: StopList::body(),
            meta: StopList::meta(),
        }
    }
}

/// Report settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Which page content is counted.
    pub mode: ExtractionMode,
    /// How many of the most common words are reported.
    pub top_k: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::Body,
            top_k: 20,
        }
    }
}

impl WordscoutConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| WordscoutError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| WordscoutError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/wordscout/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("wordscout").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("wordscout")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/wordscout-config/config.toml")
        }
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`WordscoutError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.search
            .validate()
            .map_err(|e| WordscoutError::Config(e.to_string()))?;
        self.fetch
            .client_config()
            .validate()
            .map_err(|e| WordscoutError::Config(e.to_string()))?;
        if self.fetch.concurrency == 0 {
            return Err(WordscoutError::Config(
                "fetch concurrency must be greater than 0".into(),
            ));
        }
        if self.report.top_k == 0 {
            return Err(WordscoutError::Config(
                "report top_k must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
