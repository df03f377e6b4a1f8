//! Directory collection
//!
//! Lists the immediate children of each configured root under the home
//! directory. Any unreadable root aborts the whole scan.

use std::ffi::OsString;
use std::fs::FileType;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::{debug, instrument};

use crate::error::{Result, ScanError};

/// A single child of a scanned root
#[derive(Debug, Clone)]
pub struct ScannedEntry {
    /// Raw file name of the child
    pub name: OsString,
    /// File type as reported by the directory listing (symlinks not followed)
    pub file_type: FileType,
}

impl ScannedEntry {
    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }
}

/// Children of one root, tagged by the root's name
#[derive(Debug, Clone)]
pub struct Listing {
    /// Root name relative to home, e.g. `dev` or `.config`
    pub category: String,
    /// Immediate children, sorted by name
    pub entries: Vec<ScannedEntry>,
}

/// Resolve the current user's home directory
pub fn home_dir() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| ScanError::HomeDirNotFound.into())
}

/// List the immediate children of every root, in root order
#[instrument(skip(home), fields(home_dir = %home.display()))]
pub async fn collect_directories<S: AsRef<str> + std::fmt::Debug>(
    home: &Path,
    roots: &[S],
) -> Result<Vec<Listing>> {
    let mut listings = Vec::with_capacity(roots.len());

    for root in roots {
        let category = root.as_ref();
        let entries = read_children(&home.join(category)).await?;
        debug!("{} entries under {}", entries.len(), category);

        listings.push(Listing {
            category: category.to_string(),
            entries,
        });
    }

    Ok(listings)
}

async fn read_children(dir: &Path) -> Result<Vec<ScannedEntry>> {
    let read_err = |source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut reader = tokio::fs::read_dir(dir).await.map_err(read_err)?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await.map_err(read_err)? {
        let file_type = entry.file_type().await.map_err(read_err)?;
        entries.push(ScannedEntry {
            name: entry.file_name(),
            file_type,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
