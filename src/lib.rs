pub mod config;
pub mod error;
pub mod index;
pub mod open;
pub mod search;

pub use config::Config;
pub use error::CpprefError;
pub use index::{IndexEntry, IndexOption, IndexStorage, SymbolIndex};
pub use search::{Action, OutputMode, Resolver, SearchMode};
