//! Attach-or-create for a chosen project directory
//!
//! A launch is two sequential tmux invocations: an idempotent
//! `new-session -d` followed by either `switch-client` (already inside tmux)
//! or `attach-session` (plain terminal).

use std::ffi::OsStr;
use std::path::Path;

use tracing::{debug, info, warn};

use super::executor::TmuxRunner;
use crate::error::{Error, Result};

/// Environment variable tmux sets inside its sessions
pub const TMUX_ENV: &str = "TMUX";

/// Exit code reserved for "user quit without choosing"
pub const NO_SELECTION_EXIT_CODE: u8 = 10;

/// Derive a tmux session name from a project path
///
/// Uses the final path component with `.` and `:` (not allowed in tmux
/// target names) replaced by `_`.
pub fn session_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    base.replace(['.', ':'], "_")
}

/// How to bring the current terminal into the target session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachStrategy {
    /// Already inside tmux: move this client to the target session
    SwitchClient,
    /// Plain terminal: attach and take over the display
    Attach,
}

impl AttachStrategy {
    /// Inspect `$TMUX` in the current environment
    pub fn detect() -> Self {
        Self::from_marker(std::env::var_os(TMUX_ENV).as_deref())
    }

    /// Decide from the value of the tmux marker variable
    pub fn from_marker(marker: Option<&OsStr>) -> Self {
        match marker {
            Some(value) if !value.is_empty() => Self::SwitchClient,
            _ => Self::Attach,
        }
    }

    fn subcommand(self) -> &'static str {
        match self {
            Self::SwitchClient => "switch-client",
            Self::Attach => "attach-session",
        }
    }
}

/// How the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A session was attached or switched to
    Attached,
    /// The picker was dismissed without a choice
    NoSelection,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Attached => 0,
            Self::NoSelection => NO_SELECTION_EXIT_CODE,
        }
    }
}

/// Creates and attaches tmux sessions through a [`TmuxRunner`]
pub struct SessionLauncher<R> {
    runner: R,
}

impl<R: TmuxRunner> SessionLauncher<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Ensure a session rooted at `path` exists, then attach to it
    pub async fn launch(&self, path: &Path, strategy: AttachStrategy) -> Result<()> {
        let name = session_name(path);
        let target = OsStr::new(name.as_str());

        info!("Launching session '{}' at {}", name, path.display());

        let create = [
            OsStr::new("new-session"),
            OsStr::new("-d"),
            OsStr::new("-s"),
            target,
            OsStr::new("-c"),
            path.as_os_str(),
        ];

        // Creation failing is expected when the session already exists.
        if let Err(e) = self.runner.run_detached(&create).await {
            match &e {
                Error::Tmux(tmux) if tmux.is_duplicate_session() => {
                    debug!("Reusing existing session '{}'", name);
                }
                _ => warn!("Could not create session '{}': {}", name, e),
            }
        }

        let attach = [OsStr::new(strategy.subcommand()), OsStr::new("-t"), target];
        self.runner.run_attached(&attach).await
    }
}

/// Act on the picker's result
///
/// `None` never touches tmux.
pub async fn finish<R: TmuxRunner>(
    selection: Option<&Path>,
    launcher: &SessionLauncher<R>,
    strategy: AttachStrategy,
) -> Result<Outcome> {
    match selection {
        Some(path) => {
            launcher.launch(path, strategy).await?;
            Ok(Outcome::Attached)
        }
        None => {
            info!("No selection made");
            Ok(Outcome::NoSelection)
        }
    }
}
