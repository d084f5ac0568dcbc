//! Extraction mode: which part of each page gets word-counted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WordscoutError;

/// Which content of a fetched page is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Visible text of `<body>`.
    #[default]
    Body,
    /// Raw `<meta>` tags.
    Meta,
    /// Body text and meta tags, each filtered with its own stop-list.
    All,
}

impl ExtractionMode {
    /// Whether body text is extracted in this mode.
    pub fn includes_body(self) -> bool {
        matches!(self, Self::Body | Self::All)
    }

    /// Whether meta tags are extracted in this mode.
    pub fn includes_meta(self) -> bool {
        matches!(self, Self::Meta | Self::All)
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Meta => "meta",
            Self::All => "all",
        }
    }
}

impl FromStr for ExtractionMode {
    type Err = WordscoutError;

    /// Parses the `--search` flag. An empty string selects [`ExtractionMode::Body`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "b" | "body" => Ok(Self::Body),
            "m" | "meta" => Ok(Self::Meta),
            "a" | "all" => Ok(Self::All),
            other => Err(WordscoutError::InvalidSearchType(other.to_string())),
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
