use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a schema.
///
/// Load failures (`Read`, `Parse`, `NotAnObject`) and validation failures
/// (everything else) are kept distinct so callers can report them differently.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema source named a file that could not be read.
    #[error("failed to read schema file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The schema source is not valid JSON.
    #[error("failed to parse schema: {0}")]
    Parse(#[from] serde_json::Error),
    /// The schema source is valid JSON but not an object.
    #[error("failed to parse schema: expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    /// The specifier does not have the `<type>:<spec>` shape.
    #[error("invalid format for key '{field}': '{specifier}'")]
    InvalidFormat { field: String, specifier: String },
    /// A `timestamp` field carries a non-empty spec.
    #[error("timestamp type for key '{field}' should not have a specifier: '{spec}'")]
    TimestampSpecifier { field: String, spec: String },
    /// The spec does not match the grammar of its declared type.
    #[error("invalid specifier for {field_type} type '{field}': '{spec}' ({reason})")]
    InvalidSpecifier {
        field: String,
        field_type: &'static str,
        spec: String,
        reason: String,
    },
    /// `int:rand(a,b)` with `a > b`.
    #[error("invalid range for int type '{field}': rand({min},{max}) has min greater than max")]
    InvertedRange { field: String, min: i64, max: i64 },
    /// A bracketed option list with no elements.
    #[error("empty option list for {field_type} type '{field}'")]
    EmptyOptions {
        field: String,
        field_type: &'static str,
    },
}

impl SchemaError {
    /// True for failures to obtain a JSON object from the schema source.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            SchemaError::Read { .. } | SchemaError::Parse(_) | SchemaError::NotAnObject { .. }
        )
    }

    /// True for specifiers that do not conform to their type's grammar.
    pub fn is_validation_error(&self) -> bool {
        !self.is_parse_error()
    }

    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaError::InvalidFormat { field, .. }
            | SchemaError::TimestampSpecifier { field, .. }
            | SchemaError::InvalidSpecifier { field, .. }
            | SchemaError::InvertedRange { field, .. }
            | SchemaError::EmptyOptions { field, .. } => Some(field),
            SchemaError::Read { .. } | SchemaError::Parse(_) | SchemaError::NotAnObject { .. } => {
                None
            }
        }
    }
}

/// Convenience alias for results returned by schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
