use clap::ValueEnum;
use std::{fs, io, path::Path};
use tracing::debug;

use crate::{
    collision::next_free_path,
    errors::{MoveAction, Result, ShipshapeError},
};

/// What to do when the destination path is already occupied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CollisionPolicy {
    /// Replace the existing file (last mover wins).
    #[default]
    Overwrite,
    /// Leave the source file where it is.
    Skip,
    /// Move under a counter-suffixed name (file.txt -> file_1.txt).
    Rename,
}

#[derive(Debug, Clone)]
pub struct FileMover {
    policy: CollisionPolicy,
}

impl FileMover {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    /// Ensure all missing ancestor directories of `dest` exist.
    /// Succeeds if they already do.
    pub fn ensure_parent_dir(&self, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Relocate `src` to `dest`, applying the collision policy when `dest`
    /// is occupied. Falls back to copy+delete when the rename crosses a
    /// device boundary.
    pub fn move_file(&self, src: &Path, dest: &Path) -> Result<MoveAction> {
        if !src.exists() {
            return Err(ShipshapeError::Move(format!(
                "source {} no longer exists",
                src.display()
            )));
        }

        // Already at its destination, nothing to do.
        if src == dest {
            return Ok(MoveAction::Skipped);
        }

        self.ensure_parent_dir(dest)?;

        let target = if dest.exists() {
            match self.policy {
                CollisionPolicy::Overwrite => {
                    // Remove first so rename semantics match across platforms.
                    fs::remove_file(dest).map_err(|e| {
                        ShipshapeError::Move(format!(
                            "replacing {}: {}",
                            dest.display(),
                            e
                        ))
                    })?;
                    dest.to_path_buf()
                }
                CollisionPolicy::Skip => return Ok(MoveAction::Skipped),
                CollisionPolicy::Rename => next_free_path(dest),
            }
        } else {
            dest.to_path_buf()
        };

        self.rename_or_copy(src, &target)?;

        if target == dest {
            Ok(MoveAction::Moved)
        } else {
            Ok(MoveAction::Renamed(target))
        }
    }

    fn rename_or_copy(&self, src: &Path, dest: &Path) -> Result<()> {
        match fs::rename(src, dest) {
            Ok(()) => {
                debug!(src = %src.display(), dest = %dest.display(), "moved with rename");
                Ok(())
            }
            Err(e) if is_cross_device_error(&e) => {
                debug!(src = %src.display(), dest = %dest.display(), "cross-device move, falling back to copy+delete");
                fs::copy(src, dest)?;
                fs::remove_file(src)?;
                Ok(())
            }
            Err(e) => Err(ShipshapeError::Move(format!(
                "{} -> {}: {}",
                src.display(),
                dest.display(),
                e
            ))),
        }
    }
}

#[cfg(unix)]
fn is_cross_device_error(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::CrossesDevices
}

#[cfg(windows)]
fn is_cross_device_error(e: &io::Error) -> bool {
    // Windows returns ERROR_NOT_SAME_DEVICE (17) for cross-device moves
    e.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device_error(_e: &io::Error) -> bool {
    false
}
