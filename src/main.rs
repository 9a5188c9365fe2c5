use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cppref::index::{self, IndexStorage, SymbolIndexDownloader};
use cppref::open::Opener;
use cppref::search::{Action, OutputMode, Resolver, SearchMode, StdConsole};
use cppref::Config;

/// Search cppreference.com std symbols
#[derive(Parser, Debug)]
#[command(name = "cppref", author, version, about, long_about = None)]
struct Args {
    /// Index file location (defaults to <data dir>/cppref/index.json)
    #[arg(long, global = true, env = "CPPREF_INDEX_PATH")]
    index_path: Option<PathBuf>,

    /// Browser/opener command used instead of the system opener
    #[arg(long, global = true, env = "CPPREF_BROWSER")]
    browser: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the cppreference symbol index
    Index {
        /// Show index status
        #[arg(long)]
        status: bool,
    },
    /// Search for a std symbol
    Search {
        /// Print the URL instead of opening it in a browser
        #[arg(long)]
        print: bool,
        /// Symbol to search (e.g., vector); omit to pick interactively
        symbol: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries printed URLs and status output
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::new(args.index_path, args.browser)?;
    tracing::debug!("Using index at {}", config.index_path.display());

    match args.command {
        Commands::Index { status: true } => show_status(&config.storage()),
        Commands::Index { status: false } => run_index(&config).await,
        Commands::Search { print, symbol } => {
            let output = if print {
                OutputMode::Print
            } else {
                OutputMode::Open
            };
            run_search(&config, symbol.first().map(String::as_str), output)
        }
    }
}

/// `RUST_LOG` directives when given, otherwise WARN (DEBUG with `--verbose`)
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

fn show_status(storage: &IndexStorage) -> Result<()> {
    println!("{}", storage.status()?);
    Ok(())
}

async fn run_index(config: &Config) -> Result<()> {
    let markup = SymbolIndexDownloader::new()?.fetch().await?;
    let symbol_index = index::build_from_markup(&markup);

    let storage = config.storage();
    storage.persist(&symbol_index)?;
    println!(
        "Wrote {} entries to {}",
        symbol_index.len(),
        storage.path().display()
    );
    Ok(())
}

fn run_search(config: &Config, symbol: Option<&str>, output: OutputMode) -> Result<()> {
    // A missing opener is reported before any prompt is shown
    let opener = match output {
        OutputMode::Open => Some(Opener::from_config(config)?),
        OutputMode::Print => None,
    };

    let symbol_index = config.storage().load()?;
    let resolver = Resolver::new(&symbol_index).with_base_url(&config.base_url);
    let mode = match symbol {
        Some(symbol) => SearchMode::Batch(symbol),
        None => SearchMode::Interactive,
    };

    match resolver.resolve(mode, output, &mut StdConsole)? {
        Some(Action::Print(url)) => println!("{url}"),
        Some(Action::Open(url)) => {
            if let Some(opener) = &opener {
                opener.open(&url)?;
            }
        }
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_defaults() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(false, Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_bare_rust_log_level_is_honoured() {
        assert_eq!(
            log_filter(false, Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(true, Some("error")).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
    }
}
