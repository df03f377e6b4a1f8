//! Event handling for the TUI
//!
//! The picker runs a single cooperative loop: it awaits the next terminal
//! event, updates state, and redraws. There are no background tasks or ticks.

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tracing::debug;

use super::widgets::FilterMode;
use crate::error::{Result, TuiError};

/// Input events from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// User commands triggered by input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Navigate up in the list
    NavigateUp,
    /// Navigate down in the list
    NavigateDown,
    /// Jump to the first item
    First,
    /// Jump to the last item
    Last,
    /// Previous page
    PageUp,
    /// Next page
    PageDown,
    /// Choose the highlighted item
    Select,
    /// Open the filter input
    StartFilter,
    /// Clear the filter and show everything
    ClearFilter,
    /// Stop typing but keep the filter applied
    AcceptFilter,
    /// Text input into the filter
    TextInput(char),
    /// Backspace in the filter
    Backspace,
    /// Toggle the long help line
    ToggleHelp,
    /// Leave without choosing
    Quit,
}

impl UserCommand {
    /// Convert a key event to a user command for the current filter mode
    pub fn from_key(key: KeyEvent, mode: FilterMode) -> Option<Self> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Some(UserCommand::Quit),
            (KeyCode::Enter, _) => return Some(UserCommand::Select),
            _ => {}
        }

        match mode {
            FilterMode::Filtering => Self::from_filtering_key(key),
            FilterMode::Unfiltered | FilterMode::FilterApplied => Self::from_browsing_key(key, mode),
        }
    }

    fn from_filtering_key(key: KeyEvent) -> Option<Self> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Some(UserCommand::ClearFilter),
            (KeyCode::Tab, _) => Some(UserCommand::AcceptFilter),
            (KeyCode::Backspace, _) => Some(UserCommand::Backspace),

            (KeyCode::Up, _)
            | (KeyCode::Char('k'), KeyModifiers::CONTROL)
            | (KeyCode::Char('p'), KeyModifiers::CONTROL) => Some(UserCommand::NavigateUp),
            (KeyCode::Down, _)
            | (KeyCode::Char('j'), KeyModifiers::CONTROL)
            | (KeyCode::Char('n'), KeyModifiers::CONTROL) => Some(UserCommand::NavigateDown),

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                Some(UserCommand::TextInput(c))
            }

            _ => None,
        }
    }

    fn from_browsing_key(key: KeyEvent, mode: FilterMode) -> Option<Self> {
        match (key.code, key.modifiers) {
            // Navigation
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
                Some(UserCommand::NavigateUp)
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
                Some(UserCommand::NavigateDown)
            }
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => Some(UserCommand::First),
            (KeyCode::End, _) | (KeyCode::Char('G'), _) => Some(UserCommand::Last),

            // Paging
            (KeyCode::PageUp, _) | (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                Some(UserCommand::PageUp)
            }
            (KeyCode::PageDown, _) | (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                Some(UserCommand::PageDown)
            }

            // Filter
            (KeyCode::Char('/'), _) => Some(UserCommand::StartFilter),
            (KeyCode::Esc, _) if mode == FilterMode::FilterApplied => Some(UserCommand::ClearFilter),

            // Help and quit
            (KeyCode::Char('?'), _) => Some(UserCommand::ToggleHelp),
            (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => Some(UserCommand::Quit),

            _ => None,
        }
    }
}

/// Terminal event source
pub struct EventLoop {
    reader: EventStream,
}

impl EventLoop {
    /// Create a new event loop
    pub fn new() -> Self {
        Self {
            reader: EventStream::new(),
        }
    }

    /// Wait for the next key press or resize
    ///
    /// Returns `Ok(None)` once the terminal stops producing events.
    pub async fn next(&mut self) -> Result<Option<InputEvent>> {
        while let Some(event) = self.reader.next().await {
            let event = event.map_err(|e| TuiError::EventError(e.to_string()))?;

            match event {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Some(InputEvent::Key(key)));
                }
                CrosstermEvent::Resize(w, h) => return Ok(Some(InputEvent::Resize(w, h))),
                other => debug!("Ignoring terminal event: {:?}", other),
            }
        }

        Ok(None)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}
