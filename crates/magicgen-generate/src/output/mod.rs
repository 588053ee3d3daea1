pub mod clear;
pub mod ndjson;

pub use clear::clear_directory;
pub use ndjson::{WriteStats, write_records};
