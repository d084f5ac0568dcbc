//! Word frequency tables and their aggregation.
//!
//! A [`WordFrequency`] maps a token to how many times it was seen. Tables
//! merge by summing counts per key, so merging is commutative and
//! associative and the empty table is its identity.

use std::collections::HashMap;
use std::collections::hash_map;

use serde::{Deserialize, Serialize};

/// Occurrence counts keyed by token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequency {
    counts: HashMap<String, u64>,
}

impl WordFrequency {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`.
    pub fn record(&mut self, word: &str) {
        self.add(word, 1);
    }

    /// Add `count` occurrences of `word`.
    pub fn add(&mut self, word: &str, count: u64) {
        if count == 0 {
            return;
        }
        match self.counts.get_mut(word) {
            Some(existing) => *existing += count,
            None => {
                self.counts.insert(word.to_owned(), count);
            }
        }
    }

    /// Count for `word`, zero if never seen.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Whether `word` has a count.
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table has no words.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over `(word, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Keep only the words for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.counts.retain(|word, _| keep(word));
    }

    /// Add every count from `other` into this table.
    pub fn merge(&mut self, other: WordFrequency) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (word, count) in other.counts {
            match self.counts.entry(word) {
                hash_map::Entry::Occupied(mut e) => *e.get_mut() += count,
                hash_map::Entry::Vacant(e) => {
                    e.insert(count);
                }
            }
        }
    }

    /// The `k` most frequent words, count descending.
    ///
    /// Equal counts are ordered by word, ascending, so the result is
    /// deterministic.
    pub fn top_k(&self, k: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(&String, &u64)> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
            .into_iter()
            .take(k)
            .map(|(w, c)| (w.clone(), *c))
            .collect()
    }
}

impl<'a> FromIterator<&'a str> for WordFrequency {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = Self::new();
        for word in iter {
            table.record(word);
        }
        table
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for WordFrequency {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (word, count) in iter {
            let word: String = word.into();
            table.add(&word, count);
        }
        table
    }
}

/// Merge many tables into one by summing counts per word.
pub fn aggregate<I>(tables: I) -> WordFrequency
where
    I: IntoIterator<Item = WordFrequency>,
{
    tables
        .into_iter()
        .fold(WordFrequency::new(), |mut acc, table| {
            acc.merge(table);
            acc
        })
}
