//! Error types for the wordscout pipeline.

use wordscout_search::SearchError;

/// Top-level error type for a wordscout run.
///
/// Only these conditions stop a run. Per-URL fetch and extraction failures
/// are recorded in the run report instead.
#[derive(Debug, thiserror::Error)]
pub enum WordscoutError {
    /// Neither `--query` nor `--multi-query` produced a query.
    #[error("no query was provided; pass one with -q/--query or -m/--multi-query")]
    NoQuery,

    /// `--search` named an extraction mode that does not exist.
    #[error("invalid search type `{0}`; expected one of: b, body, m, meta, a, all")]
    InvalidSearchType(String),

    /// Configuration file or value error.
    #[error("config error: {0}")]
    Config(String),

    /// The search provider could not resolve any query of the run.
    #[error("search failed for query `{query}`: {source}")]
    Search {
        /// The query being resolved.
        query: String,
        /// Provider error.
        #[source]
        source: SearchError,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, WordscoutError>;
