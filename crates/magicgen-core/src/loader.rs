use std::path::Path;

use serde_json::Value;

use crate::error::{Result, SchemaError};
use crate::schema::RawSchema;

/// Load a schema from either a path to a JSON file or inline JSON text.
///
/// A source naming an existing file is read from disk; anything else is
/// parsed as JSON directly.
pub fn load_schema(source: &str) -> Result<RawSchema> {
    let path = Path::new(source);
    if path.is_file() {
        return load_schema_file(path);
    }
    parse_schema_str(source)
}

/// Load a schema from a JSON file.
pub fn load_schema_file(path: &Path) -> Result<RawSchema> {
    let contents = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema_str(&contents)
}

/// Parse inline JSON text into a schema.
pub fn parse_schema_str(contents: &str) -> Result<RawSchema> {
    let value: Value = serde_json::from_str(contents)?;
    RawSchema::from_value(value)
}
