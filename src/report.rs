//! Rendering an [`IndexReport`] for the terminal or as JSON.

use serde::Serialize;

use crate::error::{Result, WordscoutError};
use crate::pipeline::{IndexReport, QueryFailure, UrlFailure};

/// Plain-text ranking of the `top_k` most common words.
///
/// One `count  word` line per entry, followed by a summary line. Dropped
/// queries and skipped URLs are listed last so the ranking stays at the top.
pub fn render_text(report: &IndexReport, top_k: usize) -> String {
    let top = report.top_k(top_k);
    let width = top
        .first()
        .map(|(_, count)| count.to_string().len())
        .unwrap_or(1);

    let mut lines: Vec<String> = top
        .iter()
        .map(|(word, count)| format!("{count:>width$}  {word}"))
        .collect();
    lines.push(format!(
        "{} words from {} of {} pages ({} mode)",
        report.frequencies.total(),
        report.processed,
        report.urls.len(),
        report.mode,
    ));
    lines.extend(
        report
            .query_failures
            .iter()
            .map(|f| format!("dropped query {}: {}", f.query, f.reason)),
    );
    lines.extend(
        report
            .failures
            .iter()
            .map(|f| format!("skipped {}: {}", f.url, f.reason)),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    queries: &'a [String],
    query_failures: &'a [QueryFailure],
    mode: &'a str,
    urls: &'a [String],
    processed: usize,
    failures: &'a [UrlFailure],
    top: Vec<JsonEntry>,
}

#[derive(Serialize)]
struct JsonEntry {
    word: String,
    count: u64,
}

/// Pretty-printed JSON with the `top_k` ranking in place of the full table.
///
/// # Errors
///
/// Returns [`WordscoutError::Config`] if serialization fails.
pub fn render_json(report: &IndexReport, top_k: usize) -> Result<String> {
    let doc = JsonReport {
        queries: &report.queries,
        query_failures: &report.query_failures,
        mode: report.mode.name(),
        urls: &report.urls,
        processed: report.processed,
        failures: &report.failures,
        top: report
            .top_k(top_k)
            .into_iter()
            .map(|(word, count)| JsonEntry { word, count })
            .collect(),
    };
    serde_json::to_string_pretty(&doc).map_err(|e| WordscoutError::Config(e.to_string()))
}
