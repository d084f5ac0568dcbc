//! HTML content extraction: body text and raw meta tags.
//!
//! [`extract_body`] returns the visible text of the first `<body>` element,
//! text nodes concatenated in document order with no separator inserted.
//! [`extract_meta`] returns every `<meta>` element in its serialized form.

use crate::error::ExtractError;
use crate::types::MetaTag;
use scraper::{ElementRef, Html, Selector};

/// Elements whose text content is never rendered.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Extract the visible text of the document body.
///
/// Text inside `script`, `style`, `noscript` and `template` elements is
/// skipped; every other text node under `<body>` is appended as-is.
///
/// # Errors
///
/// Returns [`ExtractError::MissingBody`] if the document has no `<body>`
/// element, which happens for frameset documents.
pub fn extract_body(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("body")
        .map_err(|e| ExtractError::Parse(format!("invalid body selector: {e:?}")))?;

    let body = document
        .select(&selector)
        .next()
        .ok_or(ExtractError::MissingBody)?;

    Ok(visible_text(body))
}

/// Extract every `<meta>` element in document order.
///
/// # Errors
///
/// Returns [`ExtractError::Parse`] only if the selector cannot be built.
pub fn extract_meta(html: &str) -> Result<Vec<MetaTag>, ExtractError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("meta")
        .map_err(|e| ExtractError::Parse(format!("invalid meta selector: {e:?}")))?;

    Ok(document
        .select(&selector)
        .map(|el| MetaTag { raw: el.html() })
        .collect())
}

fn visible_text(root: ElementRef<'_>) -> String {
    let mut text = String::new();

    for node in root.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| HIDDEN_TAGS.contains(&el.value().name()));
        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}
