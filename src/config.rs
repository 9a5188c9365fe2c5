//! Per-invocation settings threaded through every command

use anyhow::Result;
use std::path::PathBuf;

use crate::index::constants::BASE_URL;
use crate::index::storage::IndexStorage;

/// Settings resolved from command line flags and the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Location of the stored index
    pub index_path: PathBuf,
    /// Command used to open URLs instead of the system opener
    pub browser: Option<String>,
    /// Site root for rehydrating relative documentation paths
    pub base_url: String,
}

impl Config {
    /// Build a config, filling in the default index location when none is given
    pub fn new(index_path: Option<PathBuf>, browser: Option<String>) -> Result<Self> {
        let index_path = match index_path {
            Some(path) => path,
            None => IndexStorage::default_path()?,
        };
        Ok(Self {
            index_path,
            browser: browser.filter(|command| !command.trim().is_empty()),
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn storage(&self) -> IndexStorage {
        IndexStorage::new(&self.index_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_are_kept() -> Result<()> {
        let config = Config::new(Some(PathBuf::from("/tmp/cppref.json")), Some("firefox".into()))?;
        assert_eq!(config.index_path, PathBuf::from("/tmp/cppref.json"));
        assert_eq!(config.browser.as_deref(), Some("firefox"));
        assert_eq!(config.storage().path(), config.index_path.as_path());
        Ok(())
    }

    #[test]
    fn test_blank_browser_falls_back_to_system_opener() -> Result<()> {
        let config = Config::new(Some(PathBuf::from("index.json")), Some("  ".into()))?;
        assert_eq!(config.browser, None);
        Ok(())
    }
}
