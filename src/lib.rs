mod engine;
mod interface;
mod mover;
mod uploader;

pub mod errors;

pub use engine::{classifier, config, organizer, scanner, utils};
pub use interface::cli;
pub use mover::{collision, file_mover};
pub use uploader::{digest, retry, store, transfer};
