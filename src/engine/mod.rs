pub mod classifier;
pub mod config;
pub mod organizer;
pub mod scanner;
pub mod utils;
