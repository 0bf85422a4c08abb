use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::file_mover::CollisionPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Move files under a directory into category sub-directories
    Organize {
        /// Source directory to organize
        path: PathBuf,

        /// Classification rules file (defaults to ./config.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// What to do when a destination file already exists
        #[arg(long, value_enum, default_value_t = CollisionPolicy::Overwrite)]
        on_collision: CollisionPolicy,
    },
    /// Upload a directory tree to an S3 bucket with integrity verification
    Upload {
        /// Target bucket name
        bucket: String,

        /// Directory to upload
        path: PathBuf,
    },
    /// Check the bucket's object-lock retention against the environment settings
    ValidateLock {
        /// Target bucket name
        bucket: String,
    },
}
