use rand::RngCore;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::warn;

use magicgen_core::Schema;

use crate::errors::GenerationError;
use crate::generators::{Clock, GeneratedValue, SystemClock, generate_value};

/// One generated record, keyed by the schema's field names in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    values: Vec<(&'a str, GeneratedValue)>,
}

impl<'a> Record<'a> {
    pub fn get(&self, name: &str) -> Option<&GeneratedValue> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.values.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &GeneratedValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null values in this record.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|(_, value)| value.is_null()).count()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .values
            .iter()
            .map(|(key, value)| {
                let json = match value {
                    GeneratedValue::Null => serde_json::Value::Null,
                    GeneratedValue::Int(value) => serde_json::Value::from(*value),
                    GeneratedValue::Float(value) => serde_json::Value::from(*value),
                    GeneratedValue::Text(value) => serde_json::Value::from(value.as_str()),
                };
                (key.to_string(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Produces records for a parsed schema.
///
/// The generator holds no random state of its own; every call draws from the
/// RNG passed in, so callers decide seeding.
pub struct RecordGenerator<'a> {
    schema: &'a Schema,
    clock: &'a dyn Clock,
}

impl<'a> RecordGenerator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self::with_clock(schema, &SystemClock)
    }

    pub fn with_clock(schema: &'a Schema, clock: &'a dyn Clock) -> Self {
        for field in schema.fields() {
            if !field.spec.is_resolved() {
                warn!(
                    field = %field.name,
                    specifier = %field.spec,
                    "field specifier did not resolve, values will be null"
                );
            }
        }
        Self { schema, clock }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<Record<'a>, GenerationError> {
        let mut values = Vec::with_capacity(self.schema.len());
        for field in self.schema.fields() {
            let value = generate_value(field, self.clock, rng)?;
            values.push((field.name.as_str(), value));
        }
        Ok(Record { values })
    }
}

/// Generate a single record from `schema` using the system clock.
pub fn generate_record<'a>(
    schema: &'a Schema,
    rng: &mut dyn RngCore,
) -> Result<Record<'a>, GenerationError> {
    RecordGenerator::with_clock(schema, &SystemClock).generate(rng)
}
