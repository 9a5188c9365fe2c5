//! Error taxonomy for cppref operations.
//!
//! Every variant is fatal for the current invocation. They travel through
//! `anyhow::Result` like any other error and can be recovered with
//! `downcast_ref::<CpprefError>()` where the kind matters.

use std::path::PathBuf;
use thiserror::Error;

/// Failures a user can act on
#[derive(Debug, Error)]
pub enum CpprefError {
    /// Missing or empty required input
    #[error("{0}")]
    Usage(String),

    /// The stored index does not exist yet
    #[error("Index not found at {}. Run `cppref index` first.", .path.display())]
    IndexNotFound { path: PathBuf },

    /// Disambiguation or a suggestion is needed but no terminal is attached
    #[error("{0}")]
    InteractiveRequired(String),

    /// No usable opener command
    #[error("{0}")]
    Configuration(String),

    /// The remote symbol index answered with a failure status
    #[error("Failed to download {url}: HTTP {status}")]
    Transport { url: String, status: u16 },
}
