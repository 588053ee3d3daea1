//! Record generation and file fan-out for magicgen.
//!
//! This crate turns a validated schema into records and writes them as
//! newline-delimited JSON files, optionally across a pool of workers.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod naming;
pub mod output;
pub mod planner;
pub mod pool;
pub mod record;

pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use generators::{Clock, FixedClock, GeneratedValue, SystemClock, generate_value};
pub use model::{FileFailure, FileReport, GenerateOptions, GenerationReport};
pub use naming::{FileNaming, FilePrefix};
pub use output::{clear_directory, write_records};
pub use record::{Record, RecordGenerator, generate_record};
