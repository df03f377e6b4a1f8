//! Error types for sessionizer
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Top-level error type for sessionizer
#[derive(Error, Debug)]
pub enum Error {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Tmux error: {0}")]
    Tmux(#[from] TmuxError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Directory collection errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Could not determine home directory")]
    HomeDirNotFound,

    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Tmux integration errors
#[derive(Error, Debug)]
pub enum TmuxError {
    #[error("Tmux command failed: {command} - {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    ExitStatus { command: String, status: ExitStatus },
}

impl TmuxError {
    /// Whether this is tmux refusing to create a session that already exists
    pub fn is_duplicate_session(&self) -> bool {
        matches!(self, TmuxError::CommandFailed { stderr, .. } if stderr.contains("duplicate session"))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),
}

/// TUI-related errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Failed to initialize terminal: {0}")]
    InitFailed(String),

    #[error("Failed to restore terminal: {0}")]
    RestoreFailed(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Event handling error: {0}")]
    EventError(String),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
