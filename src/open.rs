//! Opening documentation URLs in a browser

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::error::CpprefError;

/// Platform command that opens a URL with the user's default browser
#[cfg(target_os = "macos")]
const SYSTEM_OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const SYSTEM_OPENER: &str = "xdg-open";

/// Turn a stored documentation path into an absolute URL.
/// Anything that is not site-relative is returned unchanged.
pub fn absolute_url(base_url: &str, url: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    if url.starts_with("w/") {
        format!("{base_url}/{url}")
    } else if url.starts_with("/w/") {
        format!("{base_url}{url}")
    } else {
        url.to_string()
    }
}

/// Launches a detached viewer process for a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opener {
    program: PathBuf,
    args: Vec<String>,
}

impl Opener {
    /// Use the configured browser command, or fall back to the system opener
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.browser.as_deref() {
            Some(command) => Self::from_command(command),
            None => Self::system(),
        }
    }

    /// Parse a shell-style command line; the URL is appended as the last argument
    pub fn from_command(command: &str) -> Result<Self> {
        let mut words = shlex::split(command)
            .filter(|words| !words.is_empty())
            .ok_or_else(|| {
                CpprefError::Configuration(format!("Invalid browser command: {command:?}"))
            })?
            .into_iter();
        let program = words.next().map(PathBuf::from).unwrap_or_default();
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Locate the platform opener on PATH
    pub fn system() -> Result<Self> {
        let program = which::which(SYSTEM_OPENER).map_err(|_| {
            CpprefError::Configuration(format!(
                "{SYSTEM_OPENER} not found. Set CPPREF_BROWSER to your browser/opener command."
            ))
        })?;
        Ok(Self {
            program,
            args: Vec::new(),
        })
    }

    /// The full command line that would be run for `url`
    pub fn command_line(&self, url: &str) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .chain(std::iter::once(url.to_string()))
            .collect()
    }

    /// Spawn the opener without waiting for it
    pub fn open(&self, url: &str) -> Result<()> {
        tracing::debug!("Opening {url} with {}", self.program.display());
        Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to launch {}", self.program.display()))?;
        Ok(())
    }
}
