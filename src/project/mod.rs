//! Project entries
//!
//! Turns scanned directories into the selectable [`Entry`] records shown by the picker.

mod types;

pub use types::*;
