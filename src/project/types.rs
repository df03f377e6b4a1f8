//! Core project types

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::scan::Listing;

/// A selectable project directory
///
/// `path` is built from the raw directory name; `title` is its lossy display
/// form and is only used for rendering and filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    title: String,
    category: String,
    path: PathBuf,
}

impl Entry {
    /// Create an entry for `home/category/name`
    pub fn new(home: &Path, category: impl Into<String>, name: impl AsRef<OsStr>) -> Self {
        let category = category.into();
        let name = name.as_ref();
        let path = home.join(&category).join(name);
        let title = name.to_string_lossy().into_owned();

        Self {
            title,
            category,
            path,
        }
    }

    /// Primary label (the directory name)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Secondary label (the root the directory came from)
    pub fn description(&self) -> &str {
        &self.category
    }

    /// Text matched against the filter input
    pub fn filter_value(&self) -> &str {
        &self.title
    }

    /// Absolute path of the directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Build entries from scanned listings, keeping only directories
pub fn build_entries(home: &Path, listings: &[Listing]) -> Vec<Entry> {
    listings
        .iter()
        .flat_map(|listing| {
            listing
                .entries
                .iter()
                .filter(|entry| entry.is_dir())
                .map(|entry| Entry::new(home, &listing.category, &entry.name))
        })
        .collect()
}
