//! Input sources
//!
//! A source yields at most one command per tick and never blocks; no input
//! is `Ok(None)`, not an error.

use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::Result;

/// Commands recognized by the run loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePolarity,
}

/// Non-blocking source of commands
pub trait InputSource {
    fn poll(&mut self) -> Result<Option<Command>>;
}

/// Keyboard input from the terminal (expects raw mode)
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Option<Command>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(command_for_key(key)),
            _ => Ok(None),
        }
    }
}

/// Key bindings: `q`/`Esc`/Ctrl-C quit, `f` flips polarity
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::TogglePolarity),
        _ => None,
    }
}

/// Replays a fixed per-tick command sequence, then stays silent
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: VecDeque<Option<Command>>,
}

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = Option<Command>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Never yields a command
    pub fn empty() -> Self {
        Self::default()
    }

    /// `ticks` silent polls followed by `Quit`
    pub fn quit_after(ticks: usize) -> Self {
        Self::new(
            std::iter::repeat_n(None, ticks).chain(std::iter::once(Some(Command::Quit))),
        )
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<Option<Command>> {
        Ok(self.script.pop_front().flatten())
    }
}
