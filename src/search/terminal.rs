//! Terminal collaborators used by the resolver
//!
//! [`Console`] covers line prompts and TTY detection, [`Screen`] is a
//! full-screen session that renders a [`Frame`] and reads one key at a time.
//! The crossterm-backed implementations are used by the binary; tests drive
//! the same traits with scripted input.

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, BufRead, IsTerminal, Stdout, Write};

/// Keys the selection loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Backspace,
    /// Ctrl-C while the terminal is in raw mode
    Interrupt,
    /// Anything else, including resizes; only triggers a redraw
    Other,
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
            KeyCode::Char(ch) if !event.modifiers.contains(KeyModifiers::CONTROL) => Key::Char(ch),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Backspace => Key::Backspace,
            _ => Key::Other,
        }
    }
}

/// One rendered state of the selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub title: &'a str,
    pub query: &'a str,
    pub rows: Vec<&'a str>,
    pub selected: usize,
}

impl Frame<'_> {
    /// Lines as they appear on screen, top to bottom
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.title.to_string());
        lines.push(format!("Query: {}", self.query));
        for (index, row) in self.rows.iter().enumerate() {
            let prefix = if index == self.selected { "> " } else { "  " };
            lines.push(format!("{prefix}{row}"));
        }
        lines
    }
}

/// A full-screen session
pub trait Screen {
    /// Number of rows available
    fn height(&self) -> Result<usize>;

    fn draw(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Block until the next key press
    fn read_key(&mut self) -> Result<Key>;
}

/// Interaction with the user outside of full-screen sessions
pub trait Console {
    /// Whether both stdin and stdout are attached to a terminal
    fn is_interactive(&self) -> bool;

    /// Print `prompt` and read one line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Start a full-screen session; the terminal is restored when it is dropped
    fn open_screen(&mut self) -> Result<Box<dyn Screen + '_>>;
}

/// The process's own stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal() && io::stdout().is_terminal()
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok((read > 0).then_some(line))
    }

    fn open_screen(&mut self) -> Result<Box<dyn Screen + '_>> {
        Ok(Box::new(CrosstermScreen::enter()?))
    }
}

/// Raw-mode alternate screen driven by crossterm
pub struct CrosstermScreen {
    out: Stdout,
}

impl CrosstermScreen {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }
        Ok(Self { out })
    }

    fn width(&self) -> usize {
        terminal::size().map_or(80, |(columns, _)| usize::from(columns))
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Screen for CrosstermScreen {
    fn height(&self) -> Result<usize> {
        let (_, rows) = terminal::size().context("Failed to query terminal size")?;
        Ok(usize::from(rows))
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        let width = self.width().saturating_sub(1);
        let height = self.height()?;
        queue!(self.out, Clear(ClearType::All))?;
        for (row, line) in frame.lines().into_iter().take(height).enumerate() {
            let line: String = line.chars().take(width).collect();
            queue!(self.out, cursor::MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            match event::read().context("Failed to read terminal event")? {
                Event::Key(key) if key.kind != KeyEventKind::Release => return Ok(Key::from(key)),
                Event::Resize(..) => return Ok(Key::Other),
                _ => {}
            }
        }
    }
}
