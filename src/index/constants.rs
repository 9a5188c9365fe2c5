//! Constants for the cppreference site layout and the stored index file

/// Site root used to rehydrate relative documentation paths
pub const BASE_URL: &str = "https://cppreference.com";

/// Page listing every documented symbol of the standard library
pub const SYMBOL_INDEX_URL: &str = "https://cppreference.com/w/cpp/symbol_index.html";

/// Normalized path prefix of the listing page itself
pub const SYMBOL_INDEX_PATH: &str = "w/cpp/symbol_index";

/// Every accepted documentation path lives under this root
pub const DOC_ROOT: &str = "/w/cpp/";

/// Site-rooted prefix that relative hrefs may already carry
pub const SITE_PREFIX: &str = "w/";

/// Paths in the alternate wiki namespace are never documentation pages
pub const EXCLUDED_PREFIXES: &[&str] = &["mwiki/"];

/// Qualifier stripped to produce unqualified lookup aliases
pub const ALIAS_QUALIFIER: &str = "std::";

/// Schema version written to the stored index
pub const INDEX_VERSION: u32 = 1;

/// Directory names
pub const DATA_DIR: &str = "cppref";
pub const FALLBACK_DATA_DIR: &str = ".cppref";

/// File names
pub const INDEX_FILE: &str = "index.json";
