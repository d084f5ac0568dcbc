//! Core types for search results, engine identification and page content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single search result returned from a web search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the search result page.
    pub title: String,
    /// The URL of the search result.
    pub url: String,
    /// Which search engine returned this result.
    pub engine: SearchEngine,
}

/// Supported search engines that wordscout-search can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    /// Google, the default provider.
    Google,
    /// DuckDuckGo, HTML-only endpoint, tolerant of automated requests.
    DuckDuckGo,
    /// Bing, fallback with a different index.
    Bing,
}

impl SearchEngine {
    /// Returns the human-readable name of this engine.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `<meta>` element as it appeared in the page, attributes preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    /// Serialized tag, e.g. `<meta name="description" content="...">`.
    pub raw: String,
}

impl fmt::Display for MetaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Content extracted from one fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageContent {
    /// Visible text of the `<body>` element.
    Body {
        /// Concatenated text nodes in document order.
        text: String,
    },
    /// Every `<meta>` element in document order.
    Meta {
        /// Raw tags.
        tags: Vec<MetaTag>,
    },
}
