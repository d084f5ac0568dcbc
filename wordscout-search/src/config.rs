//! Search and fetch configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which engines are queried for result URLs.
//! [`FetchConfig`] controls how result pages themselves are downloaded.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::SearchEngine;

/// Default User-Agent sent when fetching result pages.
pub const DEFAULT_FETCH_USER_AGENT: &str = "Mozilla/5.0";

/// Largest `max_results` accepted; engines serve at most a page or two.
pub const MAX_RESULTS_LIMIT: usize = 100;

/// Configuration for resolving a query into result URLs.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Which search engines to query. Queried concurrently; URL lists are
    /// merged in this order.
    pub engines: Vec<SearchEngine>,
    /// Maximum number of result URLs to return per query.
    pub max_results: usize,
    /// Per-engine HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Interface language requested from engines.
    pub language: String,
    /// Whether to request safe search filtering from engines that support it.
    pub safe_search: bool,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engines: vec![SearchEngine::Google, SearchEngine::DuckDuckGo],
            max_results: 5,
            timeout_seconds: 8,
            language: "en".into(),
            safe_search: false,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `engines` must not be empty
    /// - `language` must not be blank
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.max_results > MAX_RESULTS_LIMIT {
            return Err(SearchError::Config(format!(
                "max_results must be at most {MAX_RESULTS_LIMIT}"
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.engines.is_empty() {
            return Err(SearchError::Config(
                "at least one engine must be enabled".into(),
            ));
        }
        if self.language.trim().is_empty() {
            return Err(SearchError::Config("language must not be empty".into()));
        }
        Ok(())
    }
}

/// Configuration for downloading result pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every page request.
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_FETCH_USER_AGENT.into(),
            timeout_seconds: 5,
        }
    }
}

impl FetchConfig {
    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "fetch timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
