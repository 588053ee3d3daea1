//! Value generation for schema fields.

pub mod primitives;

use rand::RngCore;
use serde::{Serialize, Serializer};
use tracing::debug;

use magicgen_core::{Field, FieldSpec};

use crate::errors::GenerationError;

/// Generated value for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl GeneratedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, GeneratedValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GeneratedValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GeneratedValue::Int(value) => Some(*value as f64),
            GeneratedValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl Serialize for GeneratedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GeneratedValue::Null => serializer.serialize_unit(),
            GeneratedValue::Int(value) => serializer.serialize_i64(*value),
            GeneratedValue::Float(value) => serializer.serialize_f64(*value),
            GeneratedValue::Text(value) => serializer.serialize_str(value),
        }
    }
}

/// Source of wall-clock time for `timestamp` fields.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now_epoch_seconds(&self) -> f64;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> f64 {
        chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_epoch_seconds(&self) -> f64 {
        self.0
    }
}

/// Resolve one field into a value.
///
/// Unresolved specifiers produce [`GeneratedValue::Null`] instead of an error.
pub fn generate_value(
    field: &Field,
    clock: &dyn Clock,
    rng: &mut dyn RngCore,
) -> Result<GeneratedValue, GenerationError> {
    match &field.spec {
        FieldSpec::Timestamp => Ok(primitives::timestamp(clock)),
        FieldSpec::Uuid => Ok(primitives::uuid_v4(rng)),
        FieldSpec::StrChoice(options) => {
            let value = primitives::choose(&field.name, options, rng)?;
            Ok(GeneratedValue::Text(value.clone()))
        }
        FieldSpec::IntRange { min, max } => primitives::int_range(&field.name, *min, *max, rng),
        FieldSpec::IntChoice(options) => {
            let value = primitives::choose(&field.name, options, rng)?;
            Ok(GeneratedValue::Int(*value))
        }
        FieldSpec::Unresolved(specifier) => {
            debug!(field = %field.name, specifier = %specifier, "unresolved field written as null");
            Ok(GeneratedValue::Null)
        }
    }
}
