//! Google search engine: the default provider.
//!
//! Google has the highest quality results but employs aggressive bot
//! detection including cookie consent walls and IP-based rate limiting.
//! A consent cookie is sent up front and result links are unwrapped from
//! Google's `/url?q=` redirects.

use crate::config::SearchConfig;
use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchEngine, SearchResult};
use scraper::{Html, Selector};
use url::Url;

/// Pre-accepted consent cookie so the results page is served directly.
const CONSENT_COOKIE: &str = "CONSENT=PENDING+987; SOCS=CAESHAgBEhIaAB";

/// Google HTML search scraper.
pub struct GoogleEngine;

impl GoogleEngine {
    /// Extract a result URL from a Google anchor `href`.
    ///
    /// Handles `/url?q=<target>&sa=...` redirects and direct absolute links.
    /// Links back into Google's own hosts are rejected.
    fn extract_url(href: &str) -> Option<String> {
        let target = if href.starts_with("/url?") {
            let parsed = Url::parse(&format!("https://www.google.com{href}")).ok()?;
            parsed
                .query_pairs()
                .find(|(key, _)| key == "q" || key == "url")
                .map(|(_, value)| value.into_owned())?
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&target).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }
        let host = parsed.host_str()?;
        if host == "google.com"
            || host.ends_with(".google.com")
            || host.ends_with(".googleusercontent.com")
        {
            return None;
        }
        Some(target)
    }
}

impl SearchEngineTrait for GoogleEngine {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "Google search");

        let client = http::build_client(config)?;

        let num = num_param(config.max_results);
        let safe = if config.safe_search { "active" } else { "off" };

        let response = client
            .get("https://www.google.com/search")
            .query(&[
                ("q", query),
                ("num", num.as_str()),
                ("hl", config.language.as_str()),
                ("start", "0"),
                ("safe", safe),
            ])
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", format!("{},en;q=0.9", config.language))
            .header("Cookie", CONSENT_COOKIE)
            .send()
            .await
            .map_err(|e| SearchError::request("Google request failed", &e))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Google HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::request("Google response read failed", &e))?;

        tracing::trace!(bytes = html.len(), "Google response received");

        parse_google_html(&html, config.max_results)
    }

    fn engine_type(&self) -> SearchEngine {
        SearchEngine::Google
    }
}

/// The `num` query parameter: a couple of spare results, since some
/// result blocks are not organic links.
fn num_param(max_results: usize) -> String {
    max_results.saturating_add(2).to_string()
}

/// Parse a Google results page into search results.
///
/// Supports both the full desktop layout (`div.g`) and the basic-HTML
/// layout served to simple clients (`div.ezO2md`).
pub(crate) fn parse_google_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse("div.g, div.ezO2md")
        .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let link_sel = Selector::parse("a[href]")
        .map_err(|e| SearchError::Parse(format!("invalid link selector: {e:?}")))?;
    let title_sel = Selector::parse("h3, span.CVA68e")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;

    let mut results: Vec<SearchResult> = Vec::new();

    for element in document.select(&result_sel) {
        let Some(url) = element
            .select(&link_sel)
            .filter_map(|a| a.value().attr("href"))
            .find_map(GoogleEngine::extract_url)
        else {
            continue;
        };

        // Nested div.g blocks can yield the same link twice.
        if results.iter().any(|r| r.url == url) {
            continue;
        }

        let title = element
            .select(&title_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        results.push(SearchResult {
            title,
            url,
            engine: SearchEngine::Google,
        });

        if results.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = results.len(), "Google results parsed");
    Ok(results)
}
