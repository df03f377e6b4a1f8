//! Terminal UI module using ratatui
//!
//! Single-threaded picker with:
//! - Fuzzy filter box, active on startup
//! - Keyboard navigation and paging
//! - Everforest theme with match highlighting

mod app;
mod event;
mod fuzzy;
mod theme;
mod widgets;

pub use app::*;
pub use event::*;
pub use fuzzy::*;
pub use theme::*;
pub use widgets::*;
