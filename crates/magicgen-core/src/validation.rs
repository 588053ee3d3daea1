use serde_json::Value;

use crate::error::{Result, SchemaError};
use crate::schema::{Field, RawSchema, Schema, json_kind};
use crate::spec::parse_specifier;

/// Validate every specifier of a loaded schema and return its parsed form.
///
/// Fields are checked in source order and the first offending field is
/// reported. Validation only inspects syntax; it never generates values.
pub fn validate_schema(raw: &RawSchema) -> Result<Schema> {
    let mut schema = Schema::default();

    for (name, value) in raw.iter() {
        let specifier = match value {
            Value::String(specifier) => specifier,
            other => {
                return Err(SchemaError::InvalidFormat {
                    field: name.to_string(),
                    specifier: format!("{other} ({})", json_kind(other)),
                });
            }
        };
        let spec = parse_specifier(name, specifier)?;
        schema.insert(Field::new(name, spec));
    }

    Ok(schema)
}
