//! Main TUI application
//!
//! Event-driven picker that coordinates:
//! - Terminal rendering with ratatui
//! - User input handling
//! - Resize handling
//!
//! The terminal is taken over only for the duration of [`Picker::run`].

use std::io::{self, Stdout};
use std::path::PathBuf;

use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Margin, Rect},
    Frame, Terminal,
};
use tracing::{debug, info, warn};

use super::event::{EventLoop, InputEvent, UserCommand};
use super::theme::{frame_size, Theme, MARGIN_HORIZONTAL, MARGIN_VERTICAL};
use super::widgets::{FilterList, FilterListState};
use crate::error::{Result, TuiError};
use crate::project::Entry;

/// Picker state, independent of the terminal
pub struct PickerState {
    /// Every entry, never mutated by filtering
    entries: Vec<Entry>,
    /// List state (filter, cursor, size)
    list: FilterListState,
    /// Path chosen by the user
    choice: Option<PathBuf>,
    /// Loop should end
    should_quit: bool,
}

impl PickerState {
    /// Create state with the filter box already open
    pub fn new(entries: Vec<Entry>) -> Self {
        let mut list = FilterListState::new(&entries);
        list.start_filtering();

        Self {
            entries,
            list,
            choice: None,
            should_quit: false,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn list(&self) -> &FilterListState {
        &self.list
    }

    /// Entry under the cursor
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.list.selected().and_then(|i| self.entries.get(i))
    }

    /// Whether the picker has reached its terminal state
    pub fn is_done(&self) -> bool {
        self.should_quit
    }

    /// Chosen path, if any
    pub fn choice(&self) -> Option<&PathBuf> {
        self.choice.as_ref()
    }

    pub fn into_choice(self) -> Option<PathBuf> {
        self.choice
    }

    /// Recompute the list size for a new viewport
    pub fn resize(&mut self, width: u16, height: u16) {
        let (h, v) = frame_size();
        self.list
            .set_size(width.saturating_sub(h), height.saturating_sub(v));
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(cmd) = UserCommand::from_key(key, self.list.mode()) {
            self.handle_command(cmd);
        }
    }

    /// Handle a user command
    pub fn handle_command(&mut self, cmd: UserCommand) {
        match cmd {
            UserCommand::NavigateUp => self.list.previous(),
            UserCommand::NavigateDown => self.list.next(),
            UserCommand::First => self.list.first(),
            UserCommand::Last => self.list.last(),
            UserCommand::PageUp => self.list.previous_page(),
            UserCommand::PageDown => self.list.next_page(),
            UserCommand::Select => self.handle_select(),
            UserCommand::StartFilter => self.list.start_filtering(),
            UserCommand::ClearFilter => self.list.clear_filter(&self.entries),
            UserCommand::AcceptFilter => self.list.accept_filter(),
            UserCommand::TextInput(c) => self.list.push_char(c, &self.entries),
            UserCommand::Backspace => self.list.pop_char(&self.entries),
            UserCommand::ToggleHelp => self.list.toggle_help(),
            UserCommand::Quit => {
                info!("Picker dismissed");
                self.should_quit = true;
            }
        }
    }

    fn handle_select(&mut self) {
        match self.selected_entry() {
            Some(entry) => {
                info!("Selected {}", entry.path().display());
                self.choice = Some(entry.path().to_path_buf());
                self.should_quit = true;
            }
            None => debug!("Select with nothing highlighted"),
        }
    }
}

/// Full-screen project picker
pub struct Picker {
    theme: Theme,
    title: String,
    state: PickerState,
    events: EventLoop,
}

impl Picker {
    /// Create a picker over `entries`
    pub fn new(entries: Vec<Entry>, theme: Theme, title: impl Into<String>) -> Self {
        Self {
            theme,
            title: title.into(),
            state: PickerState::new(entries),
            events: EventLoop::new(),
        }
    }

    /// Run until the user chooses or quits
    ///
    /// The terminal is restored before returning, on success and on error.
    pub async fn run(mut self) -> Result<Option<PathBuf>> {
        let (width, height) =
            crossterm::terminal::size().map_err(|e| TuiError::InitFailed(e.to_string()))?;
        self.state.resize(width, height);

        let mut terminal = setup_terminal()?;
        info!("Entering picker loop with {} entries", self.state.entries().len());

        let result = self.main_loop(&mut terminal).await;
        let restored = restore_terminal(&mut terminal);
        if let Err(ref e) = restored {
            warn!("Failed to restore terminal: {}", e);
        }

        result?;
        restored?;

        Ok(self.state.into_choice())
    }

    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        loop {
            terminal
                .draw(|f| render(f, &mut self.state, &self.theme, &self.title))
                .map_err(|e| TuiError::RenderError(e.to_string()))?;

            match self.events.next().await? {
                Some(InputEvent::Key(key)) => self.state.handle_key(key),
                Some(InputEvent::Resize(w, h)) => {
                    debug!("Resized to {}x{}", w, h);
                    self.state.resize(w, h);
                }
                None => {
                    warn!("Terminal event stream ended");
                    break;
                }
            }

            if self.state.is_done() {
                break;
            }
        }

        Ok(())
    }
}

/// Render the picker into a frame
pub fn render(frame: &mut Frame, state: &mut PickerState, theme: &Theme, title: &str) {
    let area = list_area(frame.area(), state.list.size());
    let list = FilterList::new(&state.entries, theme).title(title);

    frame.render_stateful_widget(list, area, &mut state.list);
}

/// Area inside the margins, no larger than the list size
fn list_area(area: Rect, (width, height): (u16, u16)) -> Rect {
    let inner = area.inner(Margin {
        horizontal: MARGIN_HORIZONTAL,
        vertical: MARGIN_VERTICAL,
    });

    Rect {
        width: inner.width.min(width),
        height: inner.height.min(height),
        ..inner
    }
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().map_err(|e| TuiError::InitFailed(e.to_string()))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| TuiError::InitFailed(e.to_string()))?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| TuiError::InitFailed(e.to_string()))?;

    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

    terminal
        .show_cursor()
        .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

    Ok(())
}
