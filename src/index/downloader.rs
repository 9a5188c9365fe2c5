//! Fetching the symbol index page

use anyhow::{Context, Result};

use crate::error::CpprefError;
use crate::index::constants::SYMBOL_INDEX_URL;

/// Maximum number of redirects followed when fetching the page
const MAX_REDIRECTS: usize = 10;

/// Downloads the raw symbol index markup
#[derive(Debug, Clone)]
pub struct SymbolIndexDownloader {
    client: reqwest::Client,
    url: String,
}

impl SymbolIndexDownloader {
    /// Create a downloader for the well-known symbol index page
    pub fn new() -> Result<Self> {
        Self::with_url(SYMBOL_INDEX_URL)
    }

    /// Create a downloader for another copy of the page, e.g. a mirror
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = Self::build_http_client()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Build the HTTP client with proper configuration
    fn build_http_client() -> Result<reqwest::Client> {
        let user_agent = Self::format_user_agent();

        tracing::debug!("Creating HTTP client with User-Agent: {}", user_agent);

        reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .context("Failed to create HTTP client")
    }

    /// Format the user-agent string
    fn format_user_agent() -> String {
        format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the page and return its markup
    pub async fn fetch(&self) -> Result<String> {
        tracing::info!("Downloading symbol index from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to download {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CpprefError::Transport {
                url: self.url.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let markup = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", self.url))?;
        tracing::debug!("Downloaded {} bytes", markup.len());
        Ok(markup)
    }
}
