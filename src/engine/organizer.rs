use std::{fs, path::Path};
use tracing::{debug, error, info};

use crate::{
    classifier::Classifier,
    config::RulesConfig,
    errors::{MoveAction, Result},
    file_mover::{CollisionPolicy, FileMover},
    scanner::Scanner,
};

/// Orchestrates the classify -> move -> cleanup pipeline over one source
/// directory.
///
/// Processing is sequential; a per-file failure is logged and propagated
/// immediately, aborting the rest of the batch.
pub struct Organizer {
    classifier: Classifier,
    mover: FileMover,
}

impl Organizer {
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            classifier: Classifier::new(rules),
            mover: FileMover::new(CollisionPolicy::default()),
        }
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.mover = FileMover::new(policy);
        self
    }

    pub fn organize(&self, root: &Path) -> Result<()> {
        // Full listing up front, so moves cannot disturb the walk.
        let files = Scanner::new(root)
            .files()
            .inspect_err(|e| error!(root = %root.display(), error = %e, "enumeration failed"))?;

        info!(root = %root.display(), count = files.len(), "organizing");

        for file in files {
            if self.classifier.is_ignored(&file) {
                debug!(path = %file.display(), "in ignore list, skipping");
                continue;
            }

            let dest = self.classifier.destination(root, &file);
            let action = self
                .mover
                .move_file(&file, &dest)
                .inspect_err(|e| error!(path = %file.display(), error = %e, "move failed"))?;

            match action {
                MoveAction::Moved => debug!(src = %file.display(), dest = %dest.display(), "moved"),
                MoveAction::Skipped => debug!(path = %file.display(), "left in place"),
                MoveAction::Renamed(ref target) => {
                    debug!(src = %file.display(), dest = %target.display(), "moved under suffixed name")
                }
            }
        }

        self.remove_empty_directories(root)
    }

    /// Remove every directory under `root` left without entries, deepest
    /// first so parents emptied by the pass are removed in the same pass.
    pub fn remove_empty_directories(&self, root: &Path) -> Result<()> {
        let dirs = Scanner::new(root)
            .directories_deepest_first()
            .inspect_err(|e| error!(root = %root.display(), error = %e, "cleanup scan failed"))?;

        for dir in dirs {
            let mut entries = fs::read_dir(&dir)
                .inspect_err(|e| error!(dir = %dir.display(), error = %e, "cleanup read failed"))?;
            if entries.next().is_none() {
                debug!(dir = %dir.display(), "removing empty directory");
                fs::remove_dir(&dir)
                    .inspect_err(|e| error!(dir = %dir.display(), error = %e, "cleanup failed"))?;
            }
        }

        Ok(())
    }
}
