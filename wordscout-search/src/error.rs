//! Error types for the wordscout-search crate.
//!
//! All errors use stable string messages suitable for display to users.
//! Search-provider failures ([`SearchError`]) are distinct from per-page
//! failures ([`FetchError`], [`ExtractError`]) because callers treat them
//! differently: a provider failure drops a query, a page failure only skips
//! that page.

/// Errors that can occur while querying search providers.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// All enabled search engines failed to return results.
    #[error("all search engines failed: {0}")]
    AllEnginesFailed(String),

    /// An engine request exceeded the configured timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// An HTTP request to a search engine failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse search engine response HTML.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Classify a failed engine request. Client timeouts become
    /// [`SearchError::Timeout`], everything else [`SearchError::Http`].
    pub(crate) fn request(context: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }
}

/// Errors raised while fetching a single result page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("timed out fetching {url}")]
    Timeout {
        /// The URL that was requested.
        url: String,
    },

    /// DNS, connection, TLS, or body read failure.
    #[error("transport error fetching {url}: {reason}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// Underlying client error message.
        reason: String,
    },

    /// The server answered with a non-success status code.
    #[error("HTTP {status} for {url}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// Numeric HTTP status.
        status: u16,
    },
}

/// Errors raised while extracting content from fetched HTML.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The document has no `<body>` element (e.g. a frameset page).
    #[error("no body element found")]
    MissingBody,

    /// A selector or document could not be processed.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for search results.
pub type Result<T> = std::result::Result<T, SearchError>;
