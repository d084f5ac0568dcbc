//! Query expansion: one comma-separated list into many queries.

use crate::error::{Result, WordscoutError};

/// Split a comma-separated list into trimmed, non-empty queries.
///
/// Order is preserved and query content is not validated.
///
/// # Errors
///
/// Returns [`WordscoutError::NoQuery`] if no non-empty query remains.
pub fn expand(list: &str) -> Result<Vec<String>> {
    let queries: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_owned)
        .collect();

    if queries.is_empty() {
        return Err(WordscoutError::NoQuery);
    }
    Ok(queries)
}

/// Pick the queries to run from the two CLI flags.
///
/// Both flags take a comma-separated list. `query` wins whenever it is
/// present; `multi_query` is only consulted when `query` is absent.
///
/// # Errors
///
/// Returns [`WordscoutError::NoQuery`] if neither is present or the chosen
/// one expands to nothing.
pub fn select(query: Option<&str>, multi_query: Option<&str>) -> Result<Vec<String>> {
    match query.or(multi_query) {
        Some(list) => expand(list),
        None => Err(WordscoutError::NoQuery),
    }
}
