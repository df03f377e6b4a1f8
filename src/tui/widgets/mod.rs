//! TUI widgets
//!
//! - `FilterList` - fuzzy-filterable, paginated project list

mod filter_list;

pub use filter_list::*;
