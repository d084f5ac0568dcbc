//! Trait definition for pluggable search engine backends.
//!
//! Each search engine (Google, DuckDuckGo, Bing) implements
//! [`SearchEngineTrait`] to provide a uniform interface for querying and
//! parsing results.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{SearchEngine, SearchResult};

/// A pluggable search engine backend.
///
/// Implementors scrape a specific search engine's HTML response and extract
/// structured [`SearchResult`] values. Each engine handles its own:
///
/// - URL construction with query encoding
/// - HTTP request with appropriate headers
/// - HTML parsing via CSS selectors
/// - Unwrapping of engine redirect links
///
/// All implementations must be `Send + Sync` for concurrent engine queries.
pub trait SearchEngineTrait: Send + Sync {
    /// Perform a web search and return parsed results in engine ranking order.
    ///
    /// At most `config.max_results` results are returned.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the HTTP request fails, the response cannot
    /// be parsed, or the engine is rate-limiting/blocking requests.
    fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Returns which [`SearchEngine`] variant this implementation represents.
    fn engine_type(&self) -> SearchEngine;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockEngine {
        engine: SearchEngine,
        urls: Vec<&'static str>,
    }

    impl SearchEngineTrait for MockEngine {
        async fn search(
            &self,
            _query: &str,
            config: &SearchConfig,
        ) -> Result<Vec<SearchResult>, SearchError> {
            if self.urls.is_empty() {
                return Err(SearchError::Parse("mock engine failure".into()));
            }
            Ok(self
                .urls
                .iter()
                .take(config.max_results)
                .map(|url| SearchResult {
                    title: String::new(),
                    url: (*url).to_string(),
                    engine: self.engine,
                })
                .collect())
        }

        fn engine_type(&self) -> SearchEngine {
            self.engine
        }
    }

    #[test]
    fn mock_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockEngine>();
    }

    #[tokio::test]
    async fn mock_engine_honours_max_results() {
        let engine = MockEngine {
            engine: SearchEngine::Google,
            urls: vec!["https://a.com", "https://b.com", "https://c.com"],
        };
        let config = SearchConfig {
            max_results: 2,
            ..Default::default()
        };

        let results = engine.search("test", &config).await.expect("should succeed");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://a.com");
    }

    #[tokio::test]
    async fn mock_engine_propagates_errors() {
        let engine = MockEngine {
            engine: SearchEngine::Bing,
            urls: vec![],
        };
        let result = engine.search("test", &SearchConfig::default()).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("mock engine failure"));
    }

    #[test]
    fn engine_type_returns_correct_variant() {
        let engine = MockEngine {
            engine: SearchEngine::DuckDuckGo,
            urls: vec![],
        };
        assert_eq!(engine.engine_type(), SearchEngine::DuckDuckGo);
    }
}
