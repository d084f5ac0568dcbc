//! Word processing: extracted text into a filtered frequency table.
//!
//! Text is lowercased and split on whitespace only, so punctuation stays
//! attached to its word (`"mat."` and `"mat"` are different tokens). Two
//! filters then apply:
//!
//! - a token equal to a stop word is dropped
//! - a token containing any stop symbol anywhere is dropped entirely
//!
//! Both lists are lowercased on construction, so filtering is
//! case-insensitive no matter how the lists were written.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::frequency::WordFrequency;

/// Default stop words for body text.
pub const BODY_STOP_WORDS: &[&str] = &[
    "a", "the", "at", "for", "with", "and", "to", "of", "or", "if", "in", "var", "none;", "you",
    "your", "font-weight:", "padding:", "margin:", "can", "width:",
];

/// Default stop symbols for body text.
pub const BODY_STOP_SYMBOLS: &[&str] = &[
    "&", "@", "!", "=", "}", "{", "//", "0;", "});", "0", "/", ")", "(", "-",
];

/// Default stop words for meta tags.
///
/// Attribute tokens (`name=...`, `content=...`) already fall to the `=`
/// symbol; what remains is the tag opener and common English filler.
pub const META_STOP_WORDS: &[&str] = &[
    "<meta", ">", "/>", "a", "the", "at", "for", "with", "and", "to", "of", "or", "if", "in",
    "you", "your", "can", "is", "on",
];

/// Default stop symbols for meta tags.
pub const META_STOP_SYMBOLS: &[&str] = &[
    "&", "@", "!", "=", "}", "{", "//", "0", "/", ")", "(", "-",
];

/// A stop-word and stop-symbol list.
///
/// Both fields are required when a list is written out in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopList {
    /// Tokens removed on exact match.
    pub stop_words: BTreeSet<String>,
    /// Substrings that remove any token containing them.
    pub stop_symbols: BTreeSet<String>,
}

impl StopList {
    /// Build a list from string slices.
    pub fn new<W, S>(stop_words: W, stop_symbols: S) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            stop_words: stop_words.into_iter().map(|w| w.as_ref().to_owned()).collect(),
            stop_symbols: stop_symbols.into_iter().map(|s| s.as_ref().to_owned()).collect(),
        }
    }

    /// A list that filters nothing.
    pub fn empty() -> Self {
        Self {
            stop_words: BTreeSet::new(),
            stop_symbols: BTreeSet::new(),
        }
    }

    /// Default list for body text.
    pub fn body() -> Self {
        Self::new(BODY_STOP_WORDS, BODY_STOP_SYMBOLS)
    }

    /// Default list for meta tags.
    pub fn meta() -> Self {
        Self::new(META_STOP_WORDS, META_STOP_SYMBOLS)
    }
}

impl Default for StopList {
    fn default() -> Self {
        Self::body()
    }
}

/// Turns text into a filtered [`WordFrequency`].
#[derive(Debug, Clone)]
pub struct WordProcessor {
    stop_words: BTreeSet<String>,
    stop_symbols: Vec<String>,
}

impl WordProcessor {
    /// Prepare a processor for `stop_list`.
    ///
    /// Entries are lowercased; empty symbols are ignored since every token
    /// would contain them.
    pub fn new(stop_list: &StopList) -> Self {
        Self {
            stop_words: stop_list.stop_words.iter().map(|w| w.to_lowercase()).collect(),
            stop_symbols: stop_list
                .stop_symbols
                .iter()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Count the words of `text`, then remove stop words and any word
    /// containing a stop symbol.
    pub fn process(&self, text: &str) -> WordFrequency {
        let lowered = text.to_lowercase();
        let mut table: WordFrequency = lowered.split_whitespace().collect();
        table.retain(|word| self.keeps(word));
        table
    }

    /// Whether `word` (already lowercase) survives filtering.
    pub fn keeps(&self, word: &str) -> bool {
        !self.stop_words.contains(word)
            && !self.stop_symbols.iter().any(|symbol| word.contains(symbol.as_str()))
    }
}
