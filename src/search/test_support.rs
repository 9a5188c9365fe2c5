//! Scripted terminal collaborators for unit tests

use anyhow::{Result, bail};
use std::collections::VecDeque;

use crate::search::terminal::{Console, Frame, Key, Screen};

const DEFAULT_HEIGHT: usize = 24;

/// Owned copy of a drawn [`Frame`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub title: String,
    pub query: String,
    pub rows: Vec<String>,
    pub selected: usize,
}

impl From<&Frame<'_>> for RecordedFrame {
    fn from(frame: &Frame<'_>) -> Self {
        Self {
            title: frame.title.to_string(),
            query: frame.query.to_string(),
            rows: frame.rows.iter().map(|row| row.to_string()).collect(),
            selected: frame.selected,
        }
    }
}

/// A screen that replays a fixed key sequence and records every frame
pub struct ScriptedScreen {
    height: usize,
    keys: VecDeque<Key>,
    pub frames: Vec<RecordedFrame>,
}

impl ScriptedScreen {
    pub fn new(height: usize, keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            height,
            keys: keys.into_iter().collect(),
            frames: Vec::new(),
        }
    }
}

impl Screen for ScriptedScreen {
    fn height(&self) -> Result<usize> {
        Ok(self.height)
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.frames.push(frame.into());
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None => bail!("key script exhausted"),
        }
    }
}

/// A console with scripted prompt answers and keys shared by every screen it opens
pub struct ScriptedConsole {
    interactive: bool,
    lines: VecDeque<String>,
    screen: ScriptedScreen,
    pub prompts: Vec<String>,
    pub frames: Vec<RecordedFrame>,
    pub screens_opened: usize,
}

impl ScriptedConsole {
    /// A console attached to a terminal
    pub fn attached() -> Self {
        Self {
            interactive: true,
            lines: VecDeque::new(),
            screen: ScriptedScreen::new(DEFAULT_HEIGHT, []),
            prompts: Vec::new(),
            frames: Vec::new(),
            screens_opened: 0,
        }
    }

    /// A console with stdin or stdout redirected
    pub fn detached() -> Self {
        Self {
            interactive: false,
            ..Self::attached()
        }
    }

    pub fn with_lines<'l>(mut self, lines: impl IntoIterator<Item = &'l str>) -> Self {
        self.lines.extend(lines.into_iter().map(String::from));
        self
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.screen.keys.extend(keys);
        self
    }
}

/// Borrowed view handing out the console's keys and recording into it
struct ConsoleScreen<'c> {
    console: &'c mut ScriptedConsole,
}

impl Screen for ConsoleScreen<'_> {
    fn height(&self) -> Result<usize> {
        self.console.screen.height()
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.console.frames.push(frame.into());
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        self.console.screen.read_key()
    }
}

impl Console for ScriptedConsole {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }

    fn open_screen(&mut self) -> Result<Box<dyn Screen + '_>> {
        self.screens_opened += 1;
        Ok(Box::new(ConsoleScreen { console: self }))
    }
}
