//! # Search Module
//!
//! Resolves what the user typed, or picks interactively, into one
//! documentation target of the loaded index.
//!
//! ## Key Components
//!
//! - [`fuzzy`] - Ordered-subsequence scoring, ranking and close-match suggestions
//! - [`select`] - Incremental filter-and-select list
//! - [`terminal`] - Console and full-screen collaborators backed by crossterm
//! - [`resolver`] - Batch and interactive resolution

pub mod fuzzy;
pub mod resolver;
pub mod select;
pub mod terminal;

#[cfg(test)]
pub(crate) mod test_support;

pub use resolver::{Action, OutputMode, Resolver, SearchMode};
pub use terminal::{Console, StdConsole};
