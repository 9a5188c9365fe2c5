//! Data model of the symbol index
//!
//! An [`IndexOption`] is one documentation target, an [`IndexEntry`] pairs a
//! symbol with its deduplicated options and a [`SymbolIndex`] is the whole
//! persisted collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One documentation target for a symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexOption {
    /// Human readable disambiguation text, usually the signature or overload note
    pub label: String,
    /// Canonical relative documentation path, e.g. `w/cpp/container/vector`
    pub url: String,
}

impl IndexOption {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// A symbol together with every option recorded for it, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub symbol: String,
    pub options: Vec<IndexOption>,
}

impl IndexEntry {
    pub fn new(symbol: impl Into<String>, options: Vec<IndexOption>) -> Self {
        Self {
            symbol: symbol.into(),
            options,
        }
    }

    /// Symbols with several options are overloads or homonyms that need disambiguation
    pub fn is_ambiguous(&self) -> bool {
        self.options.len() > 1
    }
}

/// The complete index, sorted by symbol
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolIndex {
    pub version: u32,
    /// When the index was generated; `None` for files that do not record it
    pub generated_at: Option<DateTime<Utc>>,
    pub base_url: String,
    pub entries: Vec<IndexEntry>,
}

impl SymbolIndex {
    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for an exact symbol
    pub fn entry(&self, symbol: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.symbol == symbol)
    }
}
