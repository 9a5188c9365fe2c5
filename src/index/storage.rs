use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::CpprefError;
use crate::index::constants::{BASE_URL, DATA_DIR, FALLBACK_DATA_DIR, INDEX_FILE, INDEX_VERSION};
use crate::index::types::{IndexEntry, IndexOption, SymbolIndex};

/// Reads and writes the symbol index file
#[derive(Debug, Clone)]
pub struct IndexStorage {
    path: PathBuf,
}

/// On-disk layout. Every field is optional on the way in so that older files
/// still load; `persist` only ever writes `options`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredIndex {
    #[serde(default)]
    index_version: Option<u32>,
    #[serde(default)]
    index_time: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    entries: Vec<StoredEntry>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredEntry {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<StoredOption>>,
    /// Legacy: bare urls without labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    urls: Option<Vec<Option<String>>>,
    /// Legacy: a single url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredOption {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl StoredEntry {
    /// Promote whichever encoding the entry uses into an [`IndexEntry`].
    /// Entries without a symbol or without any usable option are dropped.
    fn into_entry(self) -> Option<IndexEntry> {
        let symbol = self.symbol.filter(|symbol| !symbol.is_empty())?;

        let options: Vec<IndexOption> = if let Some(options) = self.options {
            options
                .into_iter()
                .filter_map(|option| match (option.label, option.url) {
                    (Some(label), Some(url)) if !label.is_empty() && !url.is_empty() => {
                        Some(IndexOption { label, url })
                    }
                    _ => None,
                })
                .collect()
        } else if let Some(urls) = self.urls {
            urls.into_iter()
                .flatten()
                .filter(|url| !url.is_empty())
                .map(|url| IndexOption::new(url.clone(), url))
                .collect()
        } else {
            self.url
                .filter(|url| !url.is_empty())
                .map(|url| IndexOption::new(url.clone(), url))
                .into_iter()
                .collect()
        };

        (!options.is_empty()).then_some(IndexEntry { symbol, options })
    }
}

impl From<&SymbolIndex> for StoredIndex {
    fn from(index: &SymbolIndex) -> Self {
        Self {
            index_version: Some(index.version),
            index_time: index
                .generated_at
                .map(|time| time.to_rfc3339_opts(SecondsFormat::Micros, true)),
            base_url: Some(index.base_url.clone()),
            entries: index
                .entries
                .iter()
                .map(|entry| StoredEntry {
                    symbol: Some(entry.symbol.clone()),
                    options: Some(
                        entry
                            .options
                            .iter()
                            .map(|option| StoredOption {
                                label: Some(option.label.clone()),
                                url: Some(option.url.clone()),
                            })
                            .collect(),
                    ),
                    urls: None,
                    url: None,
                })
                .collect(),
        }
    }
}

/// Summary of the stored index reported by `cppref index --status`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStatus {
    pub path: PathBuf,
    pub version: Option<String>,
    pub generated_at: Option<String>,
    pub entry_count: usize,
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index path: {}", self.path.display())?;
        writeln!(
            f,
            "Index version: {}",
            self.version.as_deref().unwrap_or("unknown")
        )?;
        writeln!(
            f,
            "Index time: {}",
            self.generated_at.as_deref().unwrap_or("unknown")
        )?;
        write!(f, "Number of entries: {}", self.entry_count)
    }
}

impl IndexStorage {
    /// Create a storage for the index file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data dir>/cppref/index.json`, or `~/.cppref/index.json`
    /// on platforms without a data directory
    pub fn default_path() -> Result<PathBuf> {
        let base = match dirs::data_dir() {
            Some(dir) => dir.join(DATA_DIR),
            None => dirs::home_dir()
                .context("Failed to get home directory")?
                .join(FALLBACK_DATA_DIR),
        };
        Ok(base.join(INDEX_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if an index has been written
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Serialize an index the way it is stored on disk
    pub fn to_json(index: &SymbolIndex) -> Result<String> {
        // Round-trip through `Value` so object keys come out sorted
        let value = serde_json::to_value(StoredIndex::from(index))?;
        let mut json = serde_json::to_string_pretty(&value)?;
        json.push('\n');
        Ok(json)
    }

    /// Replace the stored index. The file is written next to its destination
    /// and renamed into place, so a failed write leaves the old index intact.
    pub fn persist(&self, index: &SymbolIndex) -> Result<()> {
        let json = Self::to_json(index)?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

        let mut temp = tempfile::NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
        temp.write_all(json.as_bytes())
            .context("Failed to write index")?;
        temp.persist(&self.path)
            .with_context(|| format!("Failed to replace index at {}", self.path.display()))?;

        tracing::info!(
            "Wrote {} entries to {}",
            index.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Load the stored index, accepting the legacy `urls` and `url` encodings
    pub fn load(&self) -> Result<SymbolIndex> {
        if !self.exists() {
            return Err(CpprefError::IndexNotFound {
                path: self.path.clone(),
            }
            .into());
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read index at {}", self.path.display()))?;
        let index = Self::from_json(&json)
            .with_context(|| format!("Failed to parse index at {}", self.path.display()))?;
        tracing::debug!(
            "Loaded {} entries from {}",
            index.entries.len(),
            self.path.display()
        );
        Ok(index)
    }

    /// Parse the stored representation
    pub fn from_json(json: &str) -> Result<SymbolIndex> {
        let stored: StoredIndex = serde_json::from_str(json)?;
        let generated_at = stored.index_time.as_deref().and_then(|time| {
            DateTime::parse_from_rfc3339(time)
                .map(|time| time.with_timezone(&Utc))
                .inspect_err(|e| tracing::warn!("Ignoring unreadable index_time {time:?}: {e}"))
                .ok()
        });

        Ok(SymbolIndex {
            version: stored.index_version.unwrap_or(INDEX_VERSION),
            generated_at,
            base_url: stored.base_url.unwrap_or_else(|| BASE_URL.to_string()),
            entries: stored
                .entries
                .into_iter()
                .filter_map(StoredEntry::into_entry)
                .collect(),
        })
    }

    /// Report on the stored file without interpreting its entries
    pub fn status(&self) -> Result<IndexStatus> {
        if !self.exists() {
            return Err(CpprefError::IndexNotFound {
                path: self.path.clone(),
            }
            .into());
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read index at {}", self.path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse index at {}", self.path.display()))?;

        let field = |name: &str| {
            value.get(name).map(|field| match field {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            })
        };

        Ok(IndexStatus {
            path: self.path.clone(),
            version: field("index_version"),
            generated_at: field("index_time"),
            entry_count: value
                .get("entries")
                .and_then(serde_json::Value::as_array)
                .map_or(0, Vec::len),
        })
    }
}
