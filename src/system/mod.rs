pub mod aggregate;
pub mod collector;
pub mod error;
pub mod history;
pub mod process;
pub mod snapshot;
