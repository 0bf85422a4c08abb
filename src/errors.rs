use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = ShipshapeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ShipshapeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Scanning error: {0}")]
    Scan(String),

    #[error("Moving error: {0}")]
    Move(String),

    #[error("Object store error: {0}")]
    Store(String),

    #[error("Integrity error for {key}: local digest {local} != remote {remote}")]
    Integrity {
        key: String,
        local: String,
        remote: String,
    },
}

impl ShipshapeError {
    /// Whether the batch retry wrapper may re-attempt after this error.
    /// Only store transport failures and post-upload digest mismatches
    /// qualify; everything else is permanent.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Integrity { .. })
    }
}

/// Per-file outcome of a move, reported back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveAction {
    Moved,
    Skipped,
    Renamed(PathBuf),
}
