//! Integration tests for the index pipeline
//!
//! These tests run the symbol index page through extraction, merging,
//! persistence and loading, then resolve symbols against the result.

use anyhow::{Result, bail};
use chrono::{TimeZone, Utc};
use cppref::index::{self, IndexBuilder, IndexStorage, LookupTable, extractor};
use cppref::search::terminal::Screen;
use cppref::search::{Action, Console, OutputMode, Resolver, SearchMode};
use cppref::{CpprefError, IndexOption};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SYMBOL_INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>C++ Standard Library symbol index - cppreference.com</title></head>
<body>
<div id="mw-content-text">
<p>
<a href="/w/cpp/symbol_index" title="cpp/symbol index">Symbol index</a><br>
<a href="/w/cpp/container/vector" title="cpp/container/vector">std::vector</a><br>
<a href="/w/cpp/algorithm/swap" title="cpp/algorithm/swap">std::swap</a><br>
<a href="/w/cpp/container/vector/swap2" title="cpp/container/vector/swap2">std::swap</a> (std::vector)<br>
<a href="/w/cpp/string/basic_string/to_string" title="cpp/string/basic_string/to_string"><tt>std::to_string()</tt></a><br>
<a href="https://en.cppreference.com/w/cpp/io/cout#Notes">std::cout</a> <span>(since C++98)</span><br>
<a href="/mwiki/index.php?title=Special:RecentChanges">Recent changes</a><br>
<a href="mailto:admin@cppreference.com">contact</a><br>
<a href="/w/cpp/container/vector" title="cpp/container/vector">std::vector</a><br>
</p>
</div>
</body>
</html>
"#;

/// A console with no terminal attached
struct Detached;

impl Console for Detached {
    fn is_interactive(&self) -> bool {
        false
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        bail!("unexpected prompt: {prompt}")
    }

    fn open_screen(&mut self) -> Result<Box<dyn Screen + '_>> {
        bail!("unexpected full-screen session")
    }
}

fn build_fixed(markup: &str) -> cppref::SymbolIndex {
    let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    IndexBuilder::from_triples(extractor::extract(markup)).build_at(generated_at)
}

#[test]
fn test_single_anchor_yields_one_entry() {
    let index = index::build_from_markup(r#"<a href="w/cpp/container/vector">vector</a><br>"#);
    assert_eq!(index.entries.len(), 1);
    assert_eq!(index.entries[0].symbol, "vector");
    assert_eq!(
        index.entries[0].options,
        vec![IndexOption::new("vector", "w/cpp/container/vector")]
    );
    assert!(index.generated_at.is_some());
}

#[test]
fn test_page_is_extracted_and_merged() {
    let index = build_fixed(SYMBOL_INDEX_PAGE);

    let symbols: Vec<_> = index.entries.iter().map(|e| e.symbol.as_str()).collect();
    assert_eq!(
        symbols,
        vec!["std::cout", "std::swap", "std::to_string", "std::vector"]
    );

    let swap = index.entry("std::swap").unwrap();
    assert_eq!(
        swap.options,
        vec![
            IndexOption::new("std::swap", "w/cpp/algorithm/swap"),
            IndexOption::new("std::swap (std::vector)", "w/cpp/container/vector/swap2"),
        ]
    );

    // Repeated anchors collapse into a single option
    assert_eq!(index.entry("std::vector").unwrap().options.len(), 1);

    let cout = index.entry("std::cout").unwrap();
    assert_eq!(
        cout.options,
        vec![IndexOption::new("std::cout (since C++98)", "w/cpp/io/cout")]
    );

    assert!(index.entry("Symbol index").is_none());
    assert!(index.entry("Recent changes").is_none());
    assert!(index.entry("contact").is_none());
}

#[test]
fn test_persist_then_load() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = IndexStorage::new(temp_dir.path().join("nested").join("index.json"));
    assert!(!storage.exists());

    let index = build_fixed(SYMBOL_INDEX_PAGE);
    storage.persist(&index)?;
    assert!(storage.exists());

    let loaded = storage.load()?;
    assert_eq!(loaded, index);

    let status = storage.status()?;
    assert_eq!(status.entry_count, 4);
    assert_eq!(status.version.as_deref(), Some("1"));
    Ok(())
}

#[test]
fn test_rebuild_is_byte_identical() -> Result<()> {
    let first = IndexStorage::to_json(&build_fixed(SYMBOL_INDEX_PAGE))?;
    let second = IndexStorage::to_json(&build_fixed(SYMBOL_INDEX_PAGE))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_persist_replaces_previous_index() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = IndexStorage::new(temp_dir.path().join("index.json"));

    storage.persist(&build_fixed(SYMBOL_INDEX_PAGE))?;
    storage.persist(&index::build_from_markup(
        r#"<a href="w/cpp/container/vector">vector</a><br>"#,
    ))?;

    let loaded = storage.load()?;
    assert_eq!(loaded.entries.len(), 1);
    assert_eq!(loaded.entries[0].symbol, "vector");

    // Only the index file remains next to it
    let files = std::fs::read_dir(temp_dir.path())?.count();
    assert_eq!(files, 1);
    Ok(())
}

#[test]
fn test_missing_index_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = IndexStorage::new(temp_dir.path().join("index.json"));

    let err = storage.load().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CpprefError>(),
        Some(CpprefError::IndexNotFound { .. })
    ));
    assert!(err.to_string().contains("cppref index"));
    Ok(())
}

#[test]
fn test_legacy_file_resolves() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("index.json");
    std::fs::write(
        &path,
        r#"{
  "entries": [
    {"symbol": "std::vector", "urls": ["w/cpp/container/vector"]},
    {"symbol": "std::map", "url": "w/cpp/container/map"}
  ]
}"#,
    )?;

    let index = IndexStorage::new(&path).load()?;
    assert_eq!(index.generated_at, None);

    let lookup = LookupTable::from_entries(&index.entries);
    assert_eq!(
        lookup.get("vector"),
        Some(&[IndexOption::new("w/cpp/container/vector", "w/cpp/container/vector")][..])
    );
    assert_eq!(
        lookup.get("map"),
        Some(&[IndexOption::new("w/cpp/container/map", "w/cpp/container/map")][..])
    );
    Ok(())
}

#[test]
fn test_batch_search_prints_absolute_url() -> Result<()> {
    let index = build_fixed(SYMBOL_INDEX_PAGE);
    let resolver = Resolver::new(&index);

    let action = resolver.resolve(SearchMode::Batch("vector"), OutputMode::Print, &mut Detached)?;
    assert_eq!(
        action,
        Some(Action::Print(
            "https://cppreference.com/w/cpp/container/vector".to_string()
        ))
    );

    let action = resolver.resolve(
        SearchMode::Batch("to_string"),
        OutputMode::Open,
        &mut Detached,
    )?;
    assert_eq!(
        action.as_ref().map(Action::url),
        Some("https://cppreference.com/w/cpp/string/basic_string/to_string")
    );
    Ok(())
}

#[test]
fn test_ambiguous_batch_search_needs_terminal() {
    let index = build_fixed(SYMBOL_INDEX_PAGE);
    let resolver = Resolver::new(&index);

    let err = resolver
        .resolve(SearchMode::Batch("swap"), OutputMode::Print, &mut Detached)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CpprefError>(),
        Some(CpprefError::InteractiveRequired(_))
    ));
}
