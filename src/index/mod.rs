//! # Index Module
//!
//! Turns the cppreference symbol index page into a local, deduplicated
//! symbol index and reads it back at query time.
//!
//! ## Key Components
//!
//! - [`extractor`] - Ordered walk of the parsed page into (symbol, label, url) triples
//! - [`normalize`] - Canonicalization of hrefs into relative documentation paths
//! - [`builder`] - Merges triples into a sorted, deduplicated index
//! - [`storage`] - Persists and loads the index file, including legacy layouts
//! - [`lookup`] - Exact-match lookup table with unqualified aliases
//! - [`downloader`] - Fetches the page over HTTP
//! - [`types`] - Index data model
//! - [`constants`] - Site layout and file names

pub mod builder;
pub mod constants;
pub mod downloader;
pub mod extractor;
pub mod lookup;
pub mod normalize;
pub mod storage;
pub mod types;

pub use builder::IndexBuilder;
pub use downloader::SymbolIndexDownloader;
pub use lookup::LookupTable;
pub use storage::{IndexStatus, IndexStorage};
pub use types::{IndexEntry, IndexOption, SymbolIndex};

/// Extract and merge every symbol on the symbol index page
pub fn build_from_markup(markup: &str) -> SymbolIndex {
    let triples = extractor::extract(markup);
    tracing::debug!("Extracted {} symbol records", triples.len());
    IndexBuilder::from_triples(triples).build()
}
