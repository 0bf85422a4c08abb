pub mod digest;
pub mod retry;
pub mod store;
pub mod transfer;
