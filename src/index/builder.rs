//! Merging extracted triples into a deduplicated, sorted index

use crate::index::constants::{BASE_URL, INDEX_VERSION};
use crate::index::extractor::RawTriple;
use crate::index::types::{IndexEntry, IndexOption, SymbolIndex};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Accumulates options per symbol, keeping first-seen order and skipping duplicates
#[derive(Debug, Default)]
pub struct IndexBuilder {
    entries: BTreeMap<String, Vec<IndexOption>>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from extracted triples in encounter order
    pub fn from_triples(triples: impl IntoIterator<Item = RawTriple>) -> Self {
        let mut builder = Self::new();
        for triple in triples {
            let option = triple.to_option();
            builder.add(triple.symbol, option);
        }
        builder
    }

    /// Record an option for a symbol. Returns `false` when it was already present
    /// or the record is unusable.
    pub fn add(&mut self, symbol: String, option: IndexOption) -> bool {
        if symbol.is_empty() || option.url.is_empty() {
            tracing::debug!("Ignoring incomplete record {symbol:?} -> {:?}", option.url);
            return false;
        }
        let options = self.entries.entry(symbol).or_default();
        if options.contains(&option) {
            return false;
        }
        options.push(option);
        true
    }

    /// Merge every option of an existing entry
    pub fn merge_entry(&mut self, entry: IndexEntry) {
        for option in entry.options {
            self.add(entry.symbol.clone(), option);
        }
    }

    /// Number of distinct symbols collected so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finish the index stamped with the current time
    pub fn build(self) -> SymbolIndex {
        self.build_at(Utc::now())
    }

    pub fn build_at(self, generated_at: DateTime<Utc>) -> SymbolIndex {
        SymbolIndex {
            version: INDEX_VERSION,
            generated_at: Some(generated_at),
            base_url: BASE_URL.to_string(),
            entries: self
                .entries
                .into_iter()
                .map(|(symbol, options)| IndexEntry { symbol, options })
                .collect(),
        }
    }
}
