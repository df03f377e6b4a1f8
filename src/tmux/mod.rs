//! tmux integration module
//!
//! - `TmuxRunner` / `TmuxExecutor` - process boundary for tmux commands
//! - `SessionLauncher` - session naming and attach-or-create

mod executor;
mod launcher;

pub use executor::*;
pub use launcher::*;
