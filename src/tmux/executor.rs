//! tmux command execution
//!
//! [`TmuxRunner`] is the seam between the launcher and the external tmux
//! process; [`TmuxExecutor`] is the real implementation on `tokio::process`.

use std::ffi::OsStr;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::{Result, TmuxError};

/// Default tmux executable
pub const DEFAULT_PROGRAM: &str = "tmux";

/// Runs tmux subcommands
///
/// Arguments are `OsStr` so directory paths reach tmux byte for byte.
#[async_trait]
pub trait TmuxRunner: Send + Sync {
    /// Run a command in the background, capturing its output
    async fn run_detached(&self, args: &[&OsStr]) -> Result<()>;

    /// Run a command wired to this process's stdin/stdout/stderr
    async fn run_attached(&self, args: &[&OsStr]) -> Result<()>;
}

/// Spawns the tmux binary
#[derive(Debug, Clone)]
pub struct TmuxExecutor {
    program: String,
}

impl TmuxExecutor {
    /// Create an executor for the default `tmux` binary
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Create an executor for a custom tmux binary
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn display(&self, args: &[&OsStr]) -> String {
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
        format!("{} {}", self.program, args.join(" "))
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TmuxRunner for TmuxExecutor {
    #[instrument(skip(self), fields(args = ?args))]
    async fn run_detached(&self, args: &[&OsStr]) -> Result<()> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| TmuxError::CommandFailed {
                command: self.display(args),
                stderr: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(TmuxError::CommandFailed {
                command: self.display(args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into())
        }
    }

    #[instrument(skip(self), fields(args = ?args))]
    async fn run_attached(&self, args: &[&OsStr]) -> Result<()> {
        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| TmuxError::SpawnFailed {
                command: self.display(args),
                source,
            })?;

        debug!("{} exited with {}", self.display(args), status);

        if status.success() {
            Ok(())
        } else {
            Err(TmuxError::ExitStatus {
                command: self.display(args),
                status,
            }
            .into())
        }
    }
}
