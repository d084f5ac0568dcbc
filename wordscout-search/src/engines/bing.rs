//! Bing search engine: decent fallback with Microsoft's index.
//!
//! Bing sometimes wraps result links in `/ck/a` click-tracking redirects
//! whose `u` parameter carries the target as `a1` + base64url. Those are
//! unwrapped during parsing.

use crate::config::SearchConfig;
use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchResult};
use base64::Engine as _;
use scraper::{Html, Selector};
use url::Url;

/// Bing HTML search scraper.
pub struct BingEngine;

impl BingEngine {
    /// Resolve Bing click-tracking links to their target URL.
    ///
    /// Links that are not Bing redirects are returned unchanged.
    fn extract_url(href: &str) -> Option<String> {
        let parsed = Url::parse(href).ok()?;

        let is_redirect = parsed
            .host_str()
            .is_some_and(|host| host.ends_with("bing.com"))
            && parsed.path().starts_with("/ck/a");
        if !is_redirect {
            return Some(href.to_string());
        }

        let encoded = parsed
            .query_pairs()
            .find(|(key, _)| key == "u")
            .map(|(_, value)| value.into_owned())?;
        let payload = encoded.strip_prefix("a1").unwrap_or(&encoded);
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        String::from_utf8(bytes).ok()
    }
}

impl SearchEngineTrait for BingEngine {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "Bing search");

        let client = http::build_client(config)?;

        let safesearch_val = if config.safe_search { "Strict" } else { "Off" };
        let count = config.max_results.to_string();

        let response = client
            .get("https://www.bing.com/search")
            .query(&[
                ("q", query),
                ("setlang", config.language.as_str()),
                ("count", count.as_str()),
                ("safeSearch", safesearch_val),
            ])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", format!("{},en;q=0.9", config.language))
            .send()
            .await
            .map_err(|e| SearchError::request("Bing request failed", &e))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Bing HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::request("Bing response read failed", &e))?;

        tracing::trace!(bytes = html.len(), "Bing response received");

        parse_bing_html(&html, config.max_results)
    }

    fn engine_type(&self) -> SearchEngine {
        SearchEngine::Bing
    }
}

/// Parse Bing HTML response into search results.
fn parse_bing_html(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    // Bing uses li.b_algo containers for organic search results
    let result_sel = Selector::parse("li.b_algo")
        .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse("h2")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let link_sel = Selector::parse("a")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;

    let mut results = Vec::new();

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let url = title_el
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(BingEngine::extract_url);

        let url = match url {
            Some(u) if !u.is_empty() => u,
            _ => continue,
        };

        results.push(SearchResult {
            title,
            url,
            engine: SearchEngine::Bing,
        });

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "Bing results parsed");
    Ok(results)
}
