//! Resolution of a user query into a documentation target
//!
//! Batch mode starts from a typed symbol: exact lookup first, then a single
//! "did you mean" suggestion, with a search-again loop driven by line prompts.
//! Interactive mode lets the user filter the full symbol list. Whenever a
//! symbol has several options the same filter UI is used to pick one.

use anyhow::Result;

use crate::error::CpprefError;
use crate::index::lookup::LookupTable;
use crate::index::types::{IndexEntry, IndexOption, SymbolIndex};
use crate::open::absolute_url;
use crate::search::fuzzy;
use crate::search::select::{Candidate, select};
use crate::search::terminal::Console;

const SYMBOL_LIST_TITLE: &str =
    "cppref interactive search (type to filter, Enter to open, Esc to quit)";

/// How the symbol is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode<'q> {
    /// Resolve a typed symbol
    Batch(&'q str),
    /// Pick from the full symbol list
    Interactive,
}

/// What to do with the resolved target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Open,
    Print,
}

/// The final outcome of a successful resolution, carrying an absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Open(String),
    Print(String),
}

impl Action {
    pub fn url(&self) -> &str {
        match self {
            Action::Open(url) | Action::Print(url) => url,
        }
    }
}

/// Answer to the prompt shown after a failed exact lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice<'s> {
    OpenSuggestion(&'s str),
    SearchAgain,
    Quit,
}

/// Resolves queries against a loaded index
pub struct Resolver<'a> {
    index: &'a SymbolIndex,
    lookup: LookupTable<'a>,
    base_url: &'a str,
}

impl<'a> Resolver<'a> {
    /// Resolve against `index`, rehydrating URLs with the index's own base URL
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self {
            lookup: LookupTable::from_entries(&index.entries),
            base_url: &index.base_url,
            index,
        }
    }

    /// Rehydrate relative documentation paths against another site root
    pub fn with_base_url(mut self, base_url: &'a str) -> Self {
        self.base_url = base_url;
        self
    }

    /// Resolve a query and turn the chosen option into an [`Action`].
    /// `Ok(None)` means the user cancelled or quit.
    pub fn resolve(
        &self,
        mode: SearchMode<'_>,
        output: OutputMode,
        console: &mut dyn Console,
    ) -> Result<Option<Action>> {
        let option = match mode {
            SearchMode::Batch(query) => self.resolve_batch(query, console)?,
            SearchMode::Interactive => self.resolve_interactive(console)?,
        };

        let Some(option) = option else {
            tracing::debug!("Resolution cancelled");
            return Ok(None);
        };
        let url = absolute_url(self.base_url, &option.url);
        tracing::debug!("Resolved to {url}");
        Ok(Some(match output {
            OutputMode::Open => Action::Open(url),
            OutputMode::Print => Action::Print(url),
        }))
    }

    /// Exact lookup with suggestion and search-again fallbacks
    pub fn resolve_batch(
        &self,
        query: &str,
        console: &mut dyn Console,
    ) -> Result<Option<&'a IndexOption>> {
        let mut symbol = query.trim().to_string();
        if symbol.is_empty() {
            return Err(
                CpprefError::Usage("Symbol required. Example: cppref search vector".into()).into(),
            );
        }

        loop {
            if let Some(options) = self.lookup.get(&symbol) {
                return self.choose_option(&symbol, options, console);
            }

            let choice = match self.suggest(&symbol) {
                Some(suggestion) => {
                    require_terminal(
                        console,
                        "No exact match found. Run interactively to see suggested close matches.",
                    )?;
                    let prompt = format!(
                        "No exact match for '{symbol}'. Did you mean '{suggestion}'? \
                         [o]pen suggested, [s]earch again, [q]uit: "
                    );
                    match read_choice(console, &prompt)?.as_str() {
                        "" | "o" | "y" | "yes" => Choice::OpenSuggestion(suggestion),
                        "s" | "search" => Choice::SearchAgain,
                        _ => Choice::Quit,
                    }
                }
                None => {
                    require_terminal(console, "No match found.")?;
                    let prompt = format!("No match for '{symbol}'. [s]earch again, [q]uit: ");
                    match read_choice(console, &prompt)?.as_str() {
                        "" | "s" | "search" => Choice::SearchAgain,
                        _ => Choice::Quit,
                    }
                }
            };

            match choice {
                Choice::OpenSuggestion(suggestion) => {
                    let options = self.lookup.get(suggestion).unwrap_or_default();
                    return self.choose_option(suggestion, options, console);
                }
                Choice::SearchAgain => match console.read_line("Symbol: ")? {
                    Some(line) => symbol = line.trim().to_string(),
                    None => return Ok(None),
                },
                Choice::Quit => return Ok(None),
            }
        }
    }

    /// Filter the full symbol list, then disambiguate the chosen symbol
    pub fn resolve_interactive(&self, console: &mut dyn Console) -> Result<Option<&'a IndexOption>> {
        require_terminal(console, "Interactive mode must be run in a terminal.")?;

        let candidates: Vec<Candidate<&'a IndexEntry>> = self
            .index
            .entries
            .iter()
            .map(|entry| {
                let candidate = Candidate::new(entry.symbol.as_str(), entry);
                if entry.is_ambiguous() {
                    let display = format!("{} ({})", entry.symbol, entry.options.len());
                    candidate.with_display(display)
                } else {
                    candidate
                }
            })
            .collect();

        let chosen = {
            let mut screen = console.open_screen()?;
            select(screen.as_mut(), SYMBOL_LIST_TITLE, &candidates)?.copied()
        };
        match chosen {
            Some(entry) => self.choose_option(&entry.symbol, &entry.options, console),
            None => Ok(None),
        }
    }

    /// Pick one option of `symbol`, asking the user when there are several
    pub fn choose_option(
        &self,
        symbol: &str,
        options: &'a [IndexOption],
        console: &mut dyn Console,
    ) -> Result<Option<&'a IndexOption>> {
        match options {
            [] => Ok(None),
            [only] => Ok(Some(only)),
            _ => {
                require_terminal(
                    console,
                    "Multiple matches found. Run interactively to select or refine your query.",
                )?;
                let candidates: Vec<Candidate<&'a IndexOption>> = options
                    .iter()
                    .map(|option| Candidate::new(option.label.as_str(), option))
                    .collect();
                let title = format!(
                    "Select match for {symbol} (type to filter, Enter to open, Esc to quit)"
                );
                let mut screen = console.open_screen()?;
                Ok(select(screen.as_mut(), &title, &candidates)?.copied())
            }
        }
    }

    /// Closest known symbol for a failed exact lookup
    pub fn suggest(&self, symbol: &str) -> Option<&'a str> {
        fuzzy::closest_match(symbol, self.lookup.symbols())
    }
}

fn require_terminal(console: &dyn Console, message: &str) -> Result<()> {
    if console.is_interactive() {
        Ok(())
    } else {
        Err(CpprefError::InteractiveRequired(message.to_string()).into())
    }
}

/// Read a lower-cased prompt answer; end of input counts as quit
fn read_choice(console: &mut dyn Console, prompt: &str) -> Result<String> {
    Ok(console
        .read_line(prompt)?
        .map_or_else(|| "q".to_string(), |line| line.trim().to_lowercase()))
}
