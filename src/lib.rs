//! Sessionizer - pick a project directory and jump into a tmux session rooted there
//!
//! The program is a short pipeline:
//! - **Collector** - lists the immediate subdirectories of a few roots under `$HOME`
//! - **Item model** - wraps each subdirectory as a selectable [`Entry`]
//! - **Picker** - single-threaded, filterable list UI built on ratatui
//! - **Launcher** - creates (or reuses) a tmux session and attaches to it
//!
//! # Modules
//!
//! - [`scan`] - Directory collection
//! - [`project`] - Selectable project entries
//! - [`tui`] - Interactive picker
//! - [`tmux`] - Session naming and attach-or-create
//! - [`config`] - Layered configuration
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod project;
pub mod scan;
pub mod tmux;
pub mod tui;

pub use config::Config;
pub use error::{Error, Result};
pub use project::Entry;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
