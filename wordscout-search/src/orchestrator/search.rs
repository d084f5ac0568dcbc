//! Core search orchestrator: concurrent multi-engine fan-out and merge.
//!
//! Queries all configured engines concurrently, merges their URL lists in
//! configured engine order with exact-string deduplication, and truncates
//! to the requested maximum.

use crate::config::SearchConfig;
use crate::engine::SearchEngineTrait;
use crate::engines::{BingEngine, DuckDuckGoEngine, GoogleEngine};
use crate::error::SearchError;
use crate::types::{SearchEngine, SearchResult};

use super::dedup::merge_in_order;

/// Orchestrate a concurrent search across all enabled engines.
///
/// # Pipeline
///
/// 1. Fan out the query to every engine in `config.engines` with
///    [`futures::future::join_all`]
/// 2. Log per-engine errors at warn level
/// 3. Merge successful lists in engine order, dropping repeated URLs
/// 4. Truncate to `config.max_results`
///
/// # Errors
///
/// Returns [`SearchError::AllEnginesFailed`] only if **every** enabled engine
/// fails. Partial failures are logged but do not prevent results from
/// successful engines being returned.
pub async fn orchestrate_search(
    query: &str,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    let futures: Vec<_> = config
        .engines
        .iter()
        .map(|engine| {
            let q = query.to_string();
            let cfg = config.clone();
            let eng = *engine;
            async move {
                let result = query_engine(eng, &q, &cfg).await;
                (eng, result)
            }
        })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    merge_outcomes(outcomes, config.max_results)
}

/// Combine per-engine outcomes into the final result list.
///
/// `outcomes` must be in configured engine order; that order decides
/// which engine's ranking comes first in the merged list.
///
/// # Errors
///
/// Returns [`SearchError::AllEnginesFailed`] when no engine succeeded.
pub fn merge_outcomes(
    outcomes: Vec<(SearchEngine, Result<Vec<SearchResult>, SearchError>)>,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let mut lists: Vec<Vec<SearchResult>> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for (engine, outcome) in outcomes {
        match outcome {
            Ok(engine_results) => {
                tracing::debug!(%engine, count = engine_results.len(), "engine returned results");
                lists.push(engine_results);
            }
            Err(err) => {
                tracing::warn!(engine = %engine, error = %err, "engine query failed");
                errors.push(format!("{engine}: {err}"));
            }
        }
    }

    if lists.is_empty() && !errors.is_empty() {
        return Err(SearchError::AllEnginesFailed(errors.join("; ")));
    }

    let mut merged = merge_in_order(lists);
    merged.truncate(max_results);
    Ok(merged)
}

/// Query a single engine, dispatching to the concrete implementation.
async fn query_engine(
    engine: SearchEngine,
    query: &str,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>, SearchError> {
    match engine {
        SearchEngine::Google => GoogleEngine.search(query, config).await,
        SearchEngine::DuckDuckGo => DuckDuckGoEngine.search(query, config).await,
        SearchEngine::Bing => BingEngine.search(query, config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_results(engine: SearchEngine, urls: &[&str]) -> Vec<SearchResult> {
        urls.iter()
            .map(|url| SearchResult {
                title: String::new(),
                url: (*url).to_string(),
                engine,
            })
            .collect()
    }

    #[test]
    fn first_engine_ranking_comes_first() {
        let outcomes = vec![
            (
                SearchEngine::Google,
                Ok(make_results(SearchEngine::Google, &["https://g1.com", "https://shared.com"])),
            ),
            (
                SearchEngine::DuckDuckGo,
                Ok(make_results(SearchEngine::DuckDuckGo, &["https://shared.com", "https://d1.com"])),
            ),
        ];
        let merged = merge_outcomes(outcomes, 10).expect("should merge");
        let urls: Vec<&str> = merged.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://g1.com", "https://shared.com", "https://d1.com"]);
    }

    #[test]
    fn truncates_to_max_results() {
        let outcomes = vec![(
            SearchEngine::Google,
            Ok(make_results(SearchEngine::Google, &["https://a.com", "https://b.com", "https://c.com"])),
        )];
        let merged = merge_outcomes(outcomes, 2).expect("should merge");
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn partial_failure_still_returns_results() {
        let outcomes = vec![
            (SearchEngine::Google, Err(SearchError::Http("429".into()))),
            (
                SearchEngine::DuckDuckGo,
                Ok(make_results(SearchEngine::DuckDuckGo, &["https://d1.com"])),
            ),
        ];
        let merged = merge_outcomes(outcomes, 5).expect("should merge");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].engine, SearchEngine::DuckDuckGo);
    }

    #[test]
    fn all_engines_failing_is_an_error() {
        let outcomes = vec![
            (SearchEngine::Google, Err(SearchError::Http("429".into()))),
            (SearchEngine::Bing, Err(SearchError::Parse("blocked".into()))),
        ];
        let err = merge_outcomes(outcomes, 5).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("all search engines failed"));
        assert!(msg.contains("Google"));
        assert!(msg.contains("Bing"));
    }

    #[test]
    fn empty_success_is_not_an_error() {
        let outcomes = vec![(SearchEngine::Google, Ok(vec![]))];
        let merged = merge_outcomes(outcomes, 5).expect("should merge");
        assert!(merged.is_empty());
    }
}
