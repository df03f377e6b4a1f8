//! User configuration settings
//!
//! Layered configuration: defaults → environment variables → CLI args

use std::path::PathBuf;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Environment variable prefix for overrides (`SESSIONIZER_TMUX_PROGRAM`, ...)
pub const ENV_PREFIX: &str = "SESSIONIZER_";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories under `$HOME` whose children are offered as projects
    pub roots: Vec<String>,

    /// tmux executable to invoke
    pub tmux_program: String,

    /// Title shown in the picker badge
    pub title: String,

    /// Log file path (defaults to `sessionizer.log` in the temp dir)
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: vec!["dev".to_string(), ".config".to_string()],
            tmux_program: "tmux".to_string(),
            title: "Sessionizer".to_string(),
            log_file: None,
            debug: false,
        }
    }
}

impl Config {
    /// Load configuration from defaults and the environment
    pub fn load() -> Result<Self> {
        let config = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        Ok(config)
    }

    /// The layered provider stack, exposed so callers can merge further layers
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Resolve where log output should go
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("sessionizer.log"))
    }
}
