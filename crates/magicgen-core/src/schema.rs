use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::spec::parse_specifier;

/// Lower bound used by `int:rand`.
pub const DEFAULT_INT_MIN: i64 = 0;
/// Upper bound (inclusive) used by `int:rand`.
pub const DEFAULT_INT_MAX: i64 = 10000;

/// Schema as loaded from its source, before any specifier is inspected.
///
/// Entries keep the order of the source object. Values are kept as raw JSON
/// so that non-string specifiers can be reported by the validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSchema {
    entries: Vec<(String, Value)>,
}

impl RawSchema {
    /// Build a raw schema from a parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(SchemaError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }

    /// Build a raw schema from `(field, specifier)` pairs. Later duplicates
    /// replace earlier ones, matching JSON object semantics.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Map::new();
        for (key, value) in pairs {
            map.insert(key.into(), Value::String(value.into()));
        }
        Self::from_map(map)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Declared kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Timestamp,
    Str,
    Int,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Timestamp => "timestamp",
            FieldType::Str => "str",
            FieldType::Int => "int",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "timestamp" => Some(FieldType::Timestamp),
            "str" => Some(FieldType::Str),
            "int" => Some(FieldType::Int),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed field specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// `timestamp:`
    Timestamp,
    /// `str:rand`
    Uuid,
    /// `str:[...]`
    StrChoice(Vec<String>),
    /// `int:rand` and `int:rand(a,b)`
    IntRange { min: i64, max: i64 },
    /// `int:[...]`
    IntChoice(Vec<i64>),
    /// Specifier that never went through validation and did not parse.
    Unresolved(String),
}

impl FieldSpec {
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldSpec::Timestamp => Some(FieldType::Timestamp),
            FieldSpec::Uuid | FieldSpec::StrChoice(_) => Some(FieldType::Str),
            FieldSpec::IntRange { .. } | FieldSpec::IntChoice(_) => Some(FieldType::Int),
            FieldSpec::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, FieldSpec::Unresolved(_))
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Timestamp => f.write_str("timestamp:"),
            FieldSpec::Uuid => f.write_str("str:rand"),
            FieldSpec::StrChoice(options) => {
                let rendered = serde_json::to_string(options).map_err(|_| fmt::Error)?;
                write!(f, "str:{rendered}")
            }
            FieldSpec::IntRange { min, max } => write!(f, "int:rand({min},{max})"),
            FieldSpec::IntChoice(options) => {
                let rendered: Vec<String> = options.iter().map(i64::to_string).collect();
                write!(f, "int:[{}]", rendered.join(","))
            }
            FieldSpec::Unresolved(raw) => f.write_str(raw),
        }
    }
}

/// One named field of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub spec: FieldSpec,
}

impl Field {
    pub fn new(name: impl Into<String>, spec: FieldSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

/// Schema with every specifier parsed, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Build a schema from already-parsed fields. A later field with the same
    /// name replaces the earlier one in place.
    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        let mut schema = Schema::default();
        for field in fields {
            schema.insert(field);
        }
        schema
    }

    /// Parse every specifier without rejecting anything: fields that do not
    /// parse are kept as [`FieldSpec::Unresolved`].
    pub fn lenient(raw: &RawSchema) -> Self {
        let fields = raw.iter().map(|(name, value)| {
            let spec = match value {
                Value::String(specifier) => parse_specifier(name, specifier)
                    .unwrap_or_else(|_| FieldSpec::Unresolved(specifier.clone())),
                other => FieldSpec::Unresolved(other.to_string()),
            };
            Field::new(name, spec)
        });
        Self::from_fields(fields)
    }

    pub(crate) fn insert(&mut self, field: Field) {
        match self.fields.iter_mut().find(|existing| existing.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields that will resolve to null at generation time.
    pub fn unresolved_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| !field.spec.is_resolved())
            .count()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
