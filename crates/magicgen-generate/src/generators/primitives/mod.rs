use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::errors::GenerationError;
use crate::generators::{Clock, GeneratedValue};

pub fn timestamp(clock: &dyn Clock) -> GeneratedValue {
    GeneratedValue::Float(clock.now_epoch_seconds())
}

/// Random (version 4) UUID in canonical hyphenated form, drawn from `rng`.
pub fn uuid_v4(rng: &mut dyn RngCore) -> GeneratedValue {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
    GeneratedValue::Text(uuid.to_string())
}

pub fn int_range(
    field: &str,
    min: i64,
    max: i64,
    rng: &mut dyn RngCore,
) -> Result<GeneratedValue, GenerationError> {
    if min > max {
        return Err(GenerationError::InvertedRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(GeneratedValue::Int(rng.random_range(min..=max)))
}

/// Uniform choice with replacement.
pub fn choose<'a, T>(
    field: &str,
    options: &'a [T],
    rng: &mut dyn RngCore,
) -> Result<&'a T, GenerationError> {
    options
        .choose(rng)
        .ok_or_else(|| GenerationError::EmptyOptions {
            field: field.to_string(),
        })
}
