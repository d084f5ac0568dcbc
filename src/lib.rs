//! Wordscout: word frequencies across the pages a web search returns.
//!
//! A run takes one or more queries and produces an aggregate count of the
//! words found on the result pages:
//! query(ies) → search provider → URLs → fetch → extract → filter → aggregate
//!
//! # Architecture
//!
//! - **Queries**: a single query or a comma-separated list ([`query`])
//! - **Search**: result URLs from scraped search engines (`wordscout-search`)
//! - **Extraction**: body text or raw meta tags, per [`ExtractionMode`]
//! - **Filtering**: stop words and stop symbols ([`words`])
//! - **Aggregation**: per-page tables summed into one ([`frequency`])
//! - **Reporting**: top-K words as text or JSON ([`report`])

pub mod config;
pub mod error;
pub mod frequency;
pub mod mode;
pub mod pipeline;
pub mod query;
pub mod report;
pub mod words;

pub use config::WordscoutConfig;
pub use error::{Result, WordscoutError};
pub use frequency::{WordFrequency, aggregate};
pub use mode::ExtractionMode;
pub use pipeline::{
    IndexReport, PageFailure, PageSource, Pipeline, PipelineOptions, QueryFailure, ResolvedUrls,
    SearchProvider, UrlFailure, UrlResolver,
};
pub use words::{StopList, WordProcessor};
