//! Result deduplication by exact URL string.
//!
//! URLs are compared byte-for-byte: no scheme, host-case, trailing-slash
//! or query-parameter normalisation is applied. The first occurrence
//! wins, so the merged list keeps provider ranking order.

use std::collections::HashSet;

use crate::types::SearchResult;

/// Merge per-engine result lists, keeping the first occurrence of each URL.
///
/// Lists are consumed in the order given; within a list, engine ranking
/// order is preserved.
pub fn merge_in_order<I>(lists: I) -> Vec<SearchResult>
where
    I: IntoIterator<Item = Vec<SearchResult>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();

    for list in lists {
        for result in list {
            if seen.insert(result.url.clone()) {
                merged.push(result);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchEngine;

    fn make_result(url: &str, engine: SearchEngine) -> SearchResult {
        SearchResult {
            title: format!("Title from {engine}"),
            url: url.to_string(),
            engine,
        }
    }

    #[test]
    fn unique_urls_pass_through_in_order() {
        let merged = merge_in_order(vec![
            vec![make_result("https://a.com", SearchEngine::Google)],
            vec![make_result("https://b.com", SearchEngine::Bing)],
        ]);
        let urls: Vec<&str> = merged.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn duplicate_urls_keep_first_engine() {
        let merged = merge_in_order(vec![
            vec![make_result("https://example.com/page", SearchEngine::Google)],
            vec![make_result("https://example.com/page", SearchEngine::DuckDuckGo)],
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].engine, SearchEngine::Google);
    }

    #[test]
    fn near_duplicates_are_distinct() {
        let merged = merge_in_order(vec![vec![
            make_result("https://example.com/path", SearchEngine::Google),
            make_result("https://example.com/path/", SearchEngine::Google),
            make_result("https://Example.com/path", SearchEngine::Google),
        ]]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn empty_input_returns_empty() {
        let merged = merge_in_order(Vec::<Vec<SearchResult>>::new());
        assert!(merged.is_empty());
    }
}
