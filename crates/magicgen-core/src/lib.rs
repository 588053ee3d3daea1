//! Schema contracts for magicgen.
//!
//! This crate loads field schemas, parses `<type>:<spec>` specifiers, and
//! rejects malformed schemas before any generation starts.

pub mod error;
pub mod loader;
pub mod schema;
pub mod spec;
pub mod validation;

pub use error::{Result, SchemaError};
pub use loader::{load_schema, load_schema_file, parse_schema_str};
pub use schema::{
    DEFAULT_INT_MAX, DEFAULT_INT_MIN, Field, FieldSpec, FieldType, RawSchema, Schema,
};
pub use spec::{parse_specifier, split_specifier};
pub use validation::validate_schema;

/// Load a schema source and validate it in one step.
pub fn load_and_validate(source: &str) -> Result<Schema> {
    let raw = load_schema(source)?;
    validate_schema(&raw)
}
