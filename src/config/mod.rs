//! Configuration module
//!
//! Layered settings: built-in defaults → `SESSIONIZER_*` environment → CLI flags.
//! There is no config file.

mod settings;

pub use settings::*;
