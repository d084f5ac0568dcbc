//! The indexing pipeline: queries in, aggregate word counts out.
//!
//! ```text
//! queries ─► resolve (per query) ─► concat + exact dedup ─► per URL:
//!     fetch ─► extract ─► filter ─► merge into aggregate
//! ```
//!
//! Resolution is sequential. A query the provider cannot answer is logged,
//! recorded in the report, and dropped; the run only fails when no query
//! resolves at all. Page processing runs with bounded concurrency; a page
//! that fails to fetch or extract is likewise recorded and skipped. The
//! aggregate has a single writer, the loop that drains completed pages.

use std::collections::HashSet;
use std::future::Future;

use futures::StreamExt;
use serde::Serialize;
use tracing::{debug, info, warn};
use wordscout_search::{
    ExtractError, FetchError, PageContent, PageFetcher, SearchConfig, SearchError,
};

use crate::config::WordscoutConfig;
use crate::error::{Result, WordscoutError};
use crate::frequency::WordFrequency;
use crate::mode::ExtractionMode;
use crate::words::{StopList, WordProcessor};

/// Turns a query into result URLs.
pub trait UrlResolver: Send + Sync {
    /// Return at most `limit` URLs for `query`, in provider ranking order.
    fn resolve(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = std::result::Result<Vec<String>, SearchError>> + Send;
}

/// Turns a URL into raw HTML.
pub trait PageSource: Send + Sync {
    /// Download the page at `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = std::result::Result<String, FetchError>> + Send;
}

/// [`UrlResolver`] backed by the scraping search engines.
#[derive(Debug, Clone)]
pub struct SearchProvider {
    config: SearchConfig,
}

impl SearchProvider {
    /// Provider using `config` for engines, language and timeouts.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl UrlResolver for SearchProvider {
    async fn resolve(
        &self,
        query: &str,
        limit: usize,
    ) -> std::result::Result<Vec<String>, SearchError> {
        wordscout_search::resolve_urls(query, limit, &self.config).await
    }
}

impl PageSource for PageFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        PageFetcher::fetch(self, url).await
    }
}

/// Why a single URL contributed nothing to the aggregate.
#[derive(Debug, thiserror::Error)]
pub enum PageFailure {
    /// The page could not be downloaded.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The page was downloaded but its content could not be extracted.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// A skipped URL and the reason, as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlFailure {
    /// The URL that was skipped.
    pub url: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// A query the provider could not resolve, as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryFailure {
    /// The query that was dropped.
    pub query: String,
    /// Provider error message.
    pub reason: String,
}

/// URLs gathered from every query that resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedUrls {
    /// Unique URLs in first-seen order.
    pub urls: Vec<String>,
    /// Queries the provider could not answer.
    pub query_failures: Vec<QueryFailure>,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    /// Queries of the run, in order, including any that failed to resolve.
    pub queries: Vec<String>,
    /// Queries the provider could not answer.
    pub query_failures: Vec<QueryFailure>,
    /// What was counted.
    pub mode: ExtractionMode,
    /// Unique URLs after deduplication, in first-seen order.
    pub urls: Vec<String>,
    /// Number of URLs whose words reached the aggregate.
    pub processed: usize,
    /// URLs that were skipped.
    pub failures: Vec<UrlFailure>,
    /// Aggregate word counts over every processed URL.
    pub frequencies: WordFrequency,
}

impl IndexReport {
    /// The `k` most common words, ties broken alphabetically.
    pub fn top_k(&self, k: usize) -> Vec<(String, u64)> {
        self.frequencies.top_k(k)
    }
}

/// Per-run knobs that do not belong to a collaborator.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// URLs requested per query.
    pub num_results: usize,
    /// What to count.
    pub mode: ExtractionMode,
    /// Stop-list for body text.
    pub body_stop_list: StopList,
    /// Stop-list for meta tags.
    pub meta_stop_list: StopList,
    /// Pages processed at once.
    pub concurrency: usize,
}

impl PipelineOptions {
    /// Options taken from a loaded configuration.
    pub fn from_config(config: &WordscoutConfig) -> Self {
        Self {
            num_results: config.search.max_results,
            mode: config.report.mode,
            body_stop_list: config.filter.body.clone(),
            meta_stop_list: config.filter.meta.clone(),
            concurrency: config.fetch.concurrency,
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_config(&WordscoutConfig::default())
    }
}

/// The indexing pipeline over a resolver and a page source.
pub struct Pipeline<R, P> {
    resolver: R,
    pages: P,
    num_results: usize,
    mode: ExtractionMode,
    body: WordProcessor,
    meta: WordProcessor,
    concurrency: usize,
}

impl Pipeline<SearchProvider, PageFetcher> {
    /// Pipeline wired to the real search engines and HTTP fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`WordscoutError::Config`] if the configuration is invalid
    /// or the HTTP client cannot be built.
    pub fn from_config(config: &WordscoutConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = PageFetcher::new(&config.fetch.client_config())
            .map_err(|e| WordscoutError::Config(e.to_string()))?;
        Ok(Self::new(
            SearchProvider::new(config.search.clone()),
            fetcher,
            PipelineOptions::from_config(config),
        ))
    }
}

impl<R: UrlResolver, P: PageSource> Pipeline<R, P> {
    /// Assemble a pipeline from its collaborators.
    pub fn new(resolver: R, pages: P, options: PipelineOptions) -> Self {
        Self {
            resolver,
            pages,
            num_results: options.num_results.max(1),
            mode: options.mode,
            body: WordProcessor::new(&options.body_stop_list),
            meta: WordProcessor::new(&options.meta_stop_list),
            concurrency: options.concurrency.max(1),
        }
    }

    /// Resolve every query and collect the unique URLs in first-seen order.
    ///
    /// Each query asks for `num_results` URLs on its own; duplicates across
    /// queries are dropped afterwards and not replaced. A query the provider
    /// cannot answer is recorded and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`WordscoutError::Search`] carrying the first provider error
    /// when no query resolves.
    pub async fn resolve_all(&self, queries: &[String]) -> Result<ResolvedUrls> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut resolved_urls = ResolvedUrls::default();
        let mut first_error: Option<(String, SearchError)> = None;
        let mut any_resolved = false;

        for query in queries {
            match self.resolver.resolve(query, self.num_results).await {
                Ok(resolved) => {
                    debug!(query = %query, count = resolved.len(), "query resolved");
                    any_resolved = true;
                    for url in resolved {
                        if seen.insert(url.clone()) {
                            resolved_urls.urls.push(url);
                        }
                    }
                }
                Err(err) => {
                    warn!(query = %query, error = %err, "dropping query");
                    resolved_urls.query_failures.push(QueryFailure {
                        query: query.clone(),
                        reason: err.to_string(),
                    });
                    if first_error.is_none() {
                        first_error = Some((query.clone(), err));
                    }
                }
            }
        }

        match first_error {
            Some((query, source)) if !any_resolved => {
                Err(WordscoutError::Search { query, source })
            }
            _ => Ok(resolved_urls),
        }
    }

    /// Fetch, extract and filter one URL.
    ///
    /// # Errors
    ///
    /// Returns a [`PageFailure`] if the page cannot be fetched or has no
    /// extractable content for the current mode.
    pub async fn process_url(&self, url: &str) -> std::result::Result<WordFrequency, PageFailure> {
        let html = self.pages.fetch(url).await?;
        let contents = extract(&html, self.mode)?;
        Ok(self.count(&contents))
    }

    /// Word counts for extracted contents, each filtered with its own list.
    pub fn count(&self, contents: &[PageContent]) -> WordFrequency {
        let mut table = WordFrequency::new();
        for content in contents {
            let counted = match content {
                PageContent::Body { text } => self.body.process(text),
                PageContent::Meta { tags } => {
                    let joined = tags
                        .iter()
                        .map(|t| t.raw.as_str())
                        .collect::<Vec<_>>()
                        .join("\n");
                    self.meta.process(&joined)
                }
            };
            table.merge(counted);
        }
        table
    }

    /// Run the whole pipeline for `queries`.
    ///
    /// # Errors
    ///
    /// Returns [`WordscoutError::NoQuery`] for an empty query list and
    /// [`WordscoutError::Search`] if no query can be resolved. Single query
    /// failures and page failures never fail the run.
    pub async fn run(&self, queries: &[String]) -> Result<IndexReport> {
        if queries.is_empty() {
            return Err(WordscoutError::NoQuery);
        }

        info!(queries = queries.len(), mode = %self.mode, "resolving queries");
        let ResolvedUrls {
            urls,
            query_failures,
        } = self.resolve_all(queries).await?;
        info!(urls = urls.len(), concurrency = self.concurrency, "processing pages");

        let mut frequencies = WordFrequency::new();
        let mut failures = Vec::new();
        let mut processed = 0;

        let mut outcomes = futures::stream::iter(urls.iter())
            .map(|url| async move { (url, self.process_url(url).await) })
            .buffer_unordered(self.concurrency);

        while let Some((url, outcome)) = outcomes.next().await {
            match outcome {
                Ok(table) => {
                    debug!(url = %url, words = table.len(), "page counted");
                    frequencies.merge(table);
                    processed += 1;
                }
                Err(err) => {
                    warn!(url = %url, error = %err, "skipping page");
                    failures.push(UrlFailure {
                        url: url.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        drop(outcomes);

        // Completion order varies with concurrency; report failures stably.
        failures.sort_by(|a, b| a.url.cmp(&b.url));

        info!(
            processed,
            failed = failures.len(),
            distinct_words = frequencies.len(),
            "indexing finished"
        );

        Ok(IndexReport {
            queries: queries.to_vec(),
            query_failures,
            mode: self.mode,
            urls,
            processed,
            failures,
            frequencies,
        })
    }
}

/// Extract the contents `mode` asks for from raw HTML.
///
/// In [`ExtractionMode::All`] a page without a body fails as a whole.
///
/// # Errors
///
/// Returns [`ExtractError::MissingBody`] when body text is requested and
/// the document has no `<body>`.
pub fn extract(html: &str, mode: ExtractionMode) -> std::result::Result<Vec<PageContent>, ExtractError> {
    let mut contents = Vec::with_capacity(2);
    if mode.includes_body() {
        contents.push(PageContent::Body {
            text: wordscout_search::extract_body(html)?,
        });
    }
    if mode.includes_meta() {
        contents.push(PageContent::Meta {
            tags: wordscout_search::extract_meta(html)?,
        });
    }
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Resolver answering from a fixed table.
    struct StaticResolver {
        answers: HashMap<&'static str, Vec<&'static str>>,
    }

    impl UrlResolver for StaticResolver {
        async fn resolve(
            &self,
            query: &str,
            limit: usize,
        ) -> std::result::Result<Vec<String>, SearchError> {
            match self.answers.get(query) {
                Some(urls) => Ok(urls.iter().take(limit).map(|u| (*u).to_string()).collect()),
                None => Err(SearchError::AllEnginesFailed(format!("no answer for {query}"))),
            }
        }
    }

    /// Page source serving fixed HTML and counting fetches per URL.
    struct StaticPages {
        pages: HashMap<&'static str, &'static str>,
        fetches: Mutex<HashMap<String, usize>>,
    }

    impl StaticPages {
        fn new(pages: &[(&'static str, &'static str)]) -> Self {
            Self {
                pages: pages.iter().copied().collect(),
                fetches: Mutex::new(HashMap::new()),
            }
        }

        fn fetch_count(&self, url: &str) -> usize {
            self.fetches
                .lock()
                .map(|f| f.get(url).copied().unwrap_or(0))
                .unwrap_or(0)
        }
    }

    impl PageSource for StaticPages {
        async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
            if let Ok(mut fetches) = self.fetches.lock() {
                *fetches.entry(url.to_string()).or_insert(0) += 1;
            }
            self.pages
                .get(url)
                .map(|html| (*html).to_string())
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn options(mode: ExtractionMode) -> PipelineOptions {
        PipelineOptions {
            num_results: 5,
            mode,
            body_stop_list: StopList::new(["the", "on"], Vec::<&str>::new()),
            meta_stop_list: StopList::meta(),
            concurrency: 1,
        }
    }

    fn queries(list: &[&str]) -> Vec<String> {
        list.iter().map(|q| (*q).to_string()).collect()
    }

    #[tokio::test]
    async fn shared_url_is_fetched_once() {
        let resolver = StaticResolver {
            answers: HashMap::from([
                ("cats", vec!["https://a.com", "https://shared.com"]),
                ("dogs", vec!["https://shared.com", "https://b.com"]),
            ]),
        };
        let pages = StaticPages::new(&[
            ("https://a.com", "<body>cat</body>"),
            ("https://shared.com", "<body>pet</body>"),
            ("https://b.com", "<body>dog</body>"),
        ]);
        let pipeline = Pipeline::new(resolver, pages, options(ExtractionMode::Body));

        let report = pipeline.run(&queries(&["cats", "dogs"])).await.expect("run");

        assert_eq!(report.urls, vec!["https://a.com", "https://shared.com", "https://b.com"]);
        assert_eq!(pipeline.pages.fetch_count("https://shared.com"), 1);
        assert_eq!(report.frequencies.get("pet"), 1);
        assert_eq!(report.processed, 3);
    }

    #[tokio::test]
    async fn failed_page_is_skipped_and_reported() {
        let resolver = StaticResolver {
            answers: HashMap::from([(
                "q",
                vec!["https://one.com", "https://missing.com", "https://two.com"],
            )]),
        };
        let pages = StaticPages::new(&[
            ("https://one.com", "<body>alpha beta</body>"),
            ("https://two.com", "<body>beta gamma</body>"),
        ]);
        let pipeline = Pipeline::new(resolver, pages, options(ExtractionMode::Body));

        let report = pipeline.run(&queries(&["q"])).await.expect("run");

        assert_eq!(report.processed, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].url, "https://missing.com");
        assert!(report.failures[0].reason.contains("404"));
        assert_eq!(report.frequencies.get("beta"), 2);
        assert_eq!(report.frequencies.get("alpha"), 1);
        assert_eq!(report.frequencies.get("gamma"), 1);
    }

    #[tokio::test]
    async fn frameset_page_is_an_extraction_failure() {
        let resolver = StaticResolver {
            answers: HashMap::from([("q", vec!["https://frames.com", "https://ok.com"])]),
        };
        let pages = StaticPages::new(&[
            (
                "https://frames.com",
                "<html><head></head><frameset><frame src=\"x\"></frameset></html>",
            ),
            ("https://ok.com", "<body>fine</body>"),
        ]);
        let pipeline = Pipeline::new(resolver, pages, options(ExtractionMode::Body));

        let report = pipeline.run(&queries(&["q"])).await.expect("run");

        assert_eq!(report.processed, 1);
        assert_eq!(report.failures[0].reason, "no body element found");
        assert_eq!(report.frequencies.get("fine"), 1);
    }

    #[tokio::test]
    async fn failed_query_is_dropped_and_the_rest_still_run() {
        let resolver = StaticResolver {
            answers: HashMap::from([("known", vec!["https://a.com"])]),
        };
        let pages = StaticPages::new(&[("https://a.com", "<body>alpha</body>")]);
        let pipeline = Pipeline::new(resolver, pages, options(ExtractionMode::Body));

        let report = pipeline
            .run(&queries(&["unknown", "known"]))
            .await
            .expect("one resolving query keeps the run alive");

        assert_eq!(report.queries, vec!["unknown", "known"]);
        assert_eq!(report.query_failures.len(), 1);
        assert_eq!(report.query_failures[0].query, "unknown");
        assert!(report.query_failures[0].reason.contains("no answer for unknown"));
        assert_eq!(pipeline.pages.fetch_count("https://a.com"), 1);
        assert_eq!(report.frequencies.get("alpha"), 1);
    }

    #[tokio::test]
    async fn every_query_failing_is_a_search_error() {
        let resolver = StaticResolver {
            answers: HashMap::new(),
        };
        let pipeline = Pipeline::new(resolver, StaticPages::new(&[]), options(ExtractionMode::Body));

        let err = pipeline
            .run(&queries(&["first", "second"]))
            .await
            .unwrap_err();

        assert!(matches!(err, WordscoutError::Search { ref query, .. } if query == "first"));
    }

    #[tokio::test]
    async fn query_with_no_results_is_not_a_failure() {
        let resolver = StaticResolver {
            answers: HashMap::from([("empty", vec![])]),
        };
        let pipeline = Pipeline::new(resolver, StaticPages::new(&[]), options(ExtractionMode::Body));

        let report = pipeline.run(&queries(&["empty"])).await.expect("run");
        assert!(report.urls.is_empty());
        assert!(report.query_failures.is_empty());
        assert!(report.frequencies.is_empty());
    }

    #[tokio::test]
    async fn empty_query_list_is_no_query() {
        let pipeline = Pipeline::new(
            StaticResolver {
                answers: HashMap::new(),
            },
            StaticPages::new(&[]),
            options(ExtractionMode::Body),
        );
        assert!(matches!(pipeline.run(&[]).await, Err(WordscoutError::NoQuery)));
    }

    #[tokio::test]
    async fn num_results_limits_each_query() {
        let resolver = StaticResolver {
            answers: HashMap::from([("q", vec!["https://1.com", "https://2.com", "https://3.com"])]),
        };
        let mut opts = options(ExtractionMode::Body);
        opts.num_results = 2;
        let pipeline = Pipeline::new(resolver, StaticPages::new(&[]), opts);

        let resolved = pipeline.resolve_all(&queries(&["q"])).await.expect("resolve");
        assert_eq!(resolved.urls, vec!["https://1.com", "https://2.com"]);
    }

    #[tokio::test]
    async fn meta_mode_counts_only_meta_tags() {
        let resolver = StaticResolver {
            answers: HashMap::from([("q", vec!["https://m.com"])]),
        };
        let pages = StaticPages::new(&[(
            "https://m.com",
            r#"<html><head><meta name="keywords" content="felines felines"></head><body>bodyword</body></html>"#,
        )]);
        let pipeline = Pipeline::new(resolver, pages, options(ExtractionMode::Meta));

        let report = pipeline.run(&queries(&["q"])).await.expect("run");

        assert!(!report.frequencies.contains("bodyword"));
        assert!(!report.frequencies.contains("<meta"));
        assert!(!report.frequencies.contains("content=\"felines"));
        assert_eq!(report.frequencies.get("felines\">"), 1);
    }

    #[tokio::test]
    async fn all_mode_counts_body_and_meta() {
        let resolver = StaticResolver {
            answers: HashMap::from([("q", vec!["https://m.com"])]),
        };
        let pages = StaticPages::new(&[(
            "https://m.com",
            r#"<html><head><meta name="author" content="crab ferris"></head><body>crab</body></html>"#,
        )]);
        let pipeline = Pipeline::new(resolver, pages, options(ExtractionMode::All));

        let report = pipeline.run(&queries(&["q"])).await.expect("run");

        assert_eq!(report.frequencies.get("crab"), 1);
        assert_eq!(report.frequencies.get("ferris\">"), 1);
    }

    #[tokio::test]
    async fn concurrency_does_not_change_totals() {
        let answers = HashMap::from([(
            "q",
            vec!["https://a.com", "https://b.com", "https://c.com", "https://d.com"],
        )]);
        let page_list = [
            ("https://a.com", "<body>x y</body>"),
            ("https://b.com", "<body>y z</body>"),
            ("https://c.com", "<body>z z</body>"),
            ("https://d.com", "<body>x</body>"),
        ];

        let sequential = Pipeline::new(
            StaticResolver {
                answers: answers.clone(),
            },
            StaticPages::new(&page_list),
            options(ExtractionMode::Body),
        );
        let mut parallel_opts = options(ExtractionMode::Body);
        parallel_opts.concurrency = 3;
        let parallel = Pipeline::new(
            StaticResolver { answers },
            StaticPages::new(&page_list),
            parallel_opts,
        );

        let a = sequential.run(&queries(&["q"])).await.expect("run");
        let b = parallel.run(&queries(&["q"])).await.expect("run");
        assert_eq!(a.frequencies, b.frequencies);
        assert_eq!(a.top_k(3), vec![("z".to_string(), 3), ("x".to_string(), 2), ("y".to_string(), 2)]);
    }

    #[test]
    fn extract_body_mode_yields_one_content() {
        let contents = extract("<body>hi</body>", ExtractionMode::Body).expect("extract");
        assert_eq!(
            contents,
            vec![PageContent::Body {
                text: "hi".to_string()
            }]
        );
    }

    #[test]
    fn extract_all_mode_yields_body_then_meta() {
        let contents = extract(
            r#"<head><meta charset="utf-8"></head><body>hi</body>"#,
            ExtractionMode::All,
        )
        .expect("extract");
        assert_eq!(contents.len(), 2);
        assert!(matches!(contents[0], PageContent::Body { .. }));
        assert!(matches!(contents[1], PageContent::Meta { ref tags } if tags.len() == 1));
    }
}
