//! Exact-match lookup table with unqualified aliases

use crate::index::constants::ALIAS_QUALIFIER;
use crate::index::types::{IndexEntry, IndexOption};
use std::collections::HashMap;

/// Maps every symbol, and the unqualified alias of every `std::` symbol, to its options.
///
/// Real symbols are registered before any alias, so an alias never shadows an
/// entry of the same name. Between aliases the first registered wins.
#[derive(Debug, Default)]
pub struct LookupTable<'a> {
    map: HashMap<&'a str, &'a [IndexOption]>,
}

impl<'a> LookupTable<'a> {
    pub fn from_entries(entries: &'a [IndexEntry]) -> Self {
        let mut map: HashMap<&'a str, &'a [IndexOption]> = HashMap::with_capacity(entries.len() * 2);
        for entry in entries {
            map.entry(entry.symbol.as_str())
                .or_insert(entry.options.as_slice());
        }
        for entry in entries {
            if let Some(alias) = entry.symbol.strip_prefix(ALIAS_QUALIFIER) {
                if !alias.is_empty() {
                    map.entry(alias).or_insert(entry.options.as_slice());
                }
            }
        }
        Self { map }
    }

    /// Options registered under `symbol`, if any
    pub fn get(&self, symbol: &str) -> Option<&'a [IndexOption]> {
        self.map.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.map.contains_key(symbol)
    }

    /// Every key, aliases included, in no particular order
    pub fn symbols(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.map.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str, url: &str) -> IndexEntry {
        IndexEntry::new(symbol, vec![IndexOption::new(symbol, url)])
    }

    #[test]
    fn test_qualified_symbol_gets_alias() {
        let entries = vec![entry("std::vector", "w/cpp/container/vector")];
        let lookup = LookupTable::from_entries(&entries);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("std::vector"), lookup.get("vector"));
        assert_eq!(lookup.get("vector").unwrap()[0].url, "w/cpp/container/vector");
    }

    #[test]
    fn test_alias_does_not_override_existing_entry() {
        let entries = vec![
            entry("std::vector", "w/cpp/container/vector"),
            entry("vector", "w/cpp/header/vector"),
        ];
        let lookup = LookupTable::from_entries(&entries);
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("vector").unwrap()[0].url, "w/cpp/header/vector");
        assert_eq!(lookup.get("std::vector").unwrap()[0].url, "w/cpp/container/vector");
    }

    #[test]
    fn test_only_leading_qualifier_is_stripped() {
        let entries = vec![
            entry("std::begin", "w/cpp/iterator/begin"),
            entry("std::ranges::begin", "w/cpp/ranges/begin"),
        ];
        let lookup = LookupTable::from_entries(&entries);
        assert_eq!(lookup.get("ranges::begin").unwrap()[0].url, "w/cpp/ranges/begin");
        assert_eq!(lookup.get("begin").unwrap()[0].url, "w/cpp/iterator/begin");
        assert!(!lookup.contains("std::"));
        assert!(lookup.get("end").is_none());
    }
}
