pub mod collision;
pub mod file_mover;
