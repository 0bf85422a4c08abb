use std::path::PathBuf;
use walkdir::WalkDir;

use crate::errors::{Result, ShipshapeError};

/// Recursive directory enumeration over one root.
///
/// Both listings are fully materialized before the caller mutates the tree,
/// so moves and removals cannot cause entries to be missed or duplicated
/// mid-walk. Symlinks are not followed.
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Every regular file under the root, sorted for a stable processing
    /// order.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(ShipshapeError::InvalidPath(self.root.clone()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(|e| ShipshapeError::Scan(e.to_string()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Every directory strictly below the root, deepest first.
    ///
    /// Sorting descending guarantees a directory is only inspected after all
    /// of its descendants, so a parent emptied by removing its last child is
    /// itself removable in the same pass.
    pub fn directories_deepest_first(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(ShipshapeError::InvalidPath(self.root.clone()));
        }

        let mut dirs = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).follow_links(false) {
            let entry = entry.map_err(|e| ShipshapeError::Scan(e.to_string()))?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }

        dirs.sort();
        dirs.reverse();
        Ok(dirs)
    }
}
