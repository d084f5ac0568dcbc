//! # wordscout-search
//!
//! Search-provider access and page retrieval for wordscout.
//!
//! This crate turns a query into result URLs by scraping public search
//! engines directly (no API keys), downloads result pages, and extracts the
//! parts of a page that get word-counted: the visible body text and the raw
//! `<meta>` tags.
//!
//! ## Design
//!
//! - Scrapes Google, DuckDuckGo and Bing using CSS selectors on HTML responses
//! - Queries engines concurrently and merges URL lists in configured order
//! - Deduplicates by exact URL string, no normalisation
//! - Graceful degradation: if some engines fail, others still return results
//! - Page fetch failures are returned per URL, never panics on a bad page

pub mod config;
pub mod content;
pub mod engine;
pub mod engines;
pub mod error;
pub mod fetch;
pub mod http;
pub mod orchestrator;
pub mod types;

pub use config::{FetchConfig, SearchConfig};
pub use content::{extract_body, extract_meta};
pub use engine::SearchEngineTrait;
pub use error::{ExtractError, FetchError, Result, SearchError};
pub use fetch::PageFetcher;
pub use types::{MetaTag, PageContent, SearchEngine, SearchResult};

/// Search the web using every configured engine concurrently.
///
/// Returns up to `config.max_results` results in provider ranking order,
/// deduplicated by exact URL.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration and
/// [`SearchError::AllEnginesFailed`] if every enabled engine fails.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> wordscout_search::Result<()> {
/// let config = wordscout_search::SearchConfig::default();
/// let results = wordscout_search::search("rust programming", &config).await?;
/// for result in &results {
///     println!("{}", result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<Vec<SearchResult>> {
    config.validate()?;
    orchestrator::search::orchestrate_search(query, config).await
}

/// Resolve a query into at most `limit` result URLs.
///
/// Convenience wrapper around [`search`] that overrides
/// `config.max_results` and drops everything but the URL.
///
/// # Errors
///
/// Same as [`search`].
pub async fn resolve_urls(query: &str, limit: usize, config: &SearchConfig) -> Result<Vec<String>> {
    let config = SearchConfig {
        max_results: limit,
        ..config.clone()
    };
    let results = search(query, &config).await?;
    Ok(results.into_iter().map(|r| r.url).collect())
}
