//! Incremental filter-and-select list
//!
//! Every keystroke edits the query or moves the cursor; the candidate list is
//! re-ranked with [`fuzzy::rank`](crate::search::fuzzy::rank) on each redraw.

use anyhow::Result;

use crate::search::fuzzy;
use crate::search::terminal::{Frame, Key, Screen};

/// Rows taken by the title and query lines
const HEADER_ROWS: usize = 2;

/// One selectable row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
    /// Text matched against the query
    pub key: String,
    /// Text shown in the list
    pub display: String,
    pub value: T,
}

impl<T> Candidate<T> {
    pub fn new(key: impl Into<String>, value: T) -> Self {
        let key = key.into();
        Self {
            display: key.clone(),
            key,
            value,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }
}

/// What a key press did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Confirm,
    Cancel,
}

/// Query text and cursor of a running selection
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    selected: usize,
}

impl FilterState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Candidates matching the current query, best first
    pub fn matches<'c, T>(&self, candidates: &'c [Candidate<T>]) -> Vec<&'c Candidate<T>> {
        fuzzy::rank(
            candidates
                .iter()
                .map(|candidate| (candidate.key.as_str(), candidate)),
            &self.query,
        )
        .into_iter()
        .map(|(_, candidate)| candidate)
        .collect()
    }

    /// Keep the cursor inside the visible rows
    pub fn clamp(&mut self, visible: usize) {
        self.selected = self.selected.min(visible.saturating_sub(1));
    }

    /// Apply one key press given the number of visible rows
    pub fn handle_key(&mut self, key: Key, visible: usize) -> Step {
        match key {
            Key::Escape | Key::Interrupt => Step::Cancel,
            Key::Enter if visible == 0 => Step::Cancel,
            Key::Enter => Step::Confirm,
            Key::Up => {
                self.selected = self.selected.saturating_sub(1);
                Step::Continue
            }
            Key::Down => {
                self.selected = (self.selected + 1).min(visible.saturating_sub(1));
                Step::Continue
            }
            Key::Backspace => {
                self.query.pop();
                self.selected = 0;
                Step::Continue
            }
            Key::Char(ch) if !ch.is_control() => {
                self.query.push(ch);
                self.selected = 0;
                Step::Continue
            }
            Key::Char(_) | Key::Other => Step::Continue,
        }
    }
}

/// Run the selection loop until the user confirms a row or cancels.
/// Returns `None` on cancel.
pub fn select<'c, T>(
    screen: &mut dyn Screen,
    title: &str,
    candidates: &'c [Candidate<T>],
) -> Result<Option<&'c T>> {
    let mut state = FilterState::default();
    loop {
        let capacity = screen.height()?.saturating_sub(HEADER_ROWS + 1).max(1);
        let mut matches = state.matches(candidates);
        matches.truncate(capacity);
        state.clamp(matches.len());

        screen.draw(&Frame {
            title,
            query: &state.query,
            rows: matches.iter().map(|c| c.display.as_str()).collect(),
            selected: state.selected,
        })?;

        match state.handle_key(screen.read_key()?, matches.len()) {
            Step::Continue => {}
            Step::Cancel => return Ok(None),
            Step::Confirm => {
                return Ok(matches.get(state.selected).map(|candidate| &candidate.value));
            }
        }
    }
}
