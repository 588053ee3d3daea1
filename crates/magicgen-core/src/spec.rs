//! Grammar for `<type>:<spec>` field specifiers.
//!
//! Bracketed option lists are read by a literal-only scanner: elements are
//! quoted strings or integers, nothing is ever evaluated.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, SchemaError};
use crate::schema::{DEFAULT_INT_MAX, DEFAULT_INT_MIN, FieldSpec, FieldType};

fn specifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(timestamp|str|int):(.*)$").expect("specifier pattern is valid")
    })
}

fn int_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^rand\(\s*(-?[0-9]+)\s*,\s*(-?[0-9]+)\s*\)$").expect("range pattern is valid")
    })
}

fn int_list_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\[\s*-?[0-9]+\s*(?:,\s*-?[0-9]+\s*)*\]$").expect("int list pattern is valid")
    })
}

/// Split a specifier into its declared type and the raw spec text.
pub fn split_specifier<'a>(field: &str, specifier: &'a str) -> Result<(FieldType, &'a str)> {
    let invalid = || SchemaError::InvalidFormat {
        field: field.to_string(),
        specifier: specifier.to_string(),
    };
    let captures = specifier_pattern().captures(specifier).ok_or_else(invalid)?;
    let field_type = captures
        .get(1)
        .and_then(|kind| FieldType::parse(kind.as_str()))
        .ok_or_else(invalid)?;
    let spec = captures.get(2).map(|spec| spec.as_str()).unwrap_or_default();
    Ok((field_type, spec))
}

/// Parse one specifier string into a [`FieldSpec`].
pub fn parse_specifier(field: &str, specifier: &str) -> Result<FieldSpec> {
    let (field_type, spec) = split_specifier(field, specifier)?;
    match field_type {
        FieldType::Timestamp => parse_timestamp(field, spec),
        FieldType::Str => parse_str(field, spec),
        FieldType::Int => parse_int(field, spec),
    }
}

fn parse_timestamp(field: &str, spec: &str) -> Result<FieldSpec> {
    if spec.is_empty() {
        Ok(FieldSpec::Timestamp)
    } else {
        Err(SchemaError::TimestampSpecifier {
            field: field.to_string(),
            spec: spec.to_string(),
        })
    }
}

fn parse_str(field: &str, spec: &str) -> Result<FieldSpec> {
    if spec == "rand" {
        return Ok(FieldSpec::Uuid);
    }
    if !is_bracketed(spec) {
        return Err(invalid_specifier(
            field,
            FieldType::Str,
            spec,
            "expected 'rand' or a list of quoted strings",
        ));
    }

    let options = parse_string_list(spec)
        .map_err(|reason| invalid_specifier(field, FieldType::Str, spec, reason))?;
    if options.is_empty() {
        return Err(SchemaError::EmptyOptions {
            field: field.to_string(),
            field_type: FieldType::Str.as_str(),
        });
    }
    Ok(FieldSpec::StrChoice(options))
}

fn parse_int(field: &str, spec: &str) -> Result<FieldSpec> {
    if spec == "rand" {
        return Ok(FieldSpec::IntRange {
            min: DEFAULT_INT_MIN,
            max: DEFAULT_INT_MAX,
        });
    }

    if let Some(captures) = int_range_pattern().captures(spec) {
        let bound = |index: usize| {
            captures
                .get(index)
                .and_then(|value| value.as_str().parse::<i64>().ok())
                .ok_or_else(|| {
                    invalid_specifier(field, FieldType::Int, spec, "range bound out of range")
                })
        };
        let (min, max) = (bound(1)?, bound(2)?);
        if min > max {
            return Err(SchemaError::InvertedRange {
                field: field.to_string(),
                min,
                max,
            });
        }
        return Ok(FieldSpec::IntRange { min, max });
    }

    if is_bracketed(spec) && spec[1..spec.len() - 1].trim().is_empty() {
        return Err(SchemaError::EmptyOptions {
            field: field.to_string(),
            field_type: FieldType::Int.as_str(),
        });
    }

    if int_list_pattern().is_match(spec) {
        let options = spec[1..spec.len() - 1]
            .split(',')
            .map(|item| item.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| {
                invalid_specifier(field, FieldType::Int, spec, "list element out of range")
            })?;
        return Ok(FieldSpec::IntChoice(options));
    }

    Err(invalid_specifier(
        field,
        FieldType::Int,
        spec,
        "expected 'rand', 'rand(min,max)' or a list of integers",
    ))
}

fn is_bracketed(spec: &str) -> bool {
    spec.len() >= 2 && spec.starts_with('[') && spec.ends_with(']')
}

fn invalid_specifier(
    field: &str,
    field_type: FieldType,
    spec: &str,
    reason: impl Into<String>,
) -> SchemaError {
    SchemaError::InvalidSpecifier {
        field: field.to_string(),
        field_type: field_type.as_str(),
        spec: spec.to_string(),
        reason: reason.into(),
    }
}

/// Parse a bracketed list of single- or double-quoted string literals.
///
/// Double-quoted elements follow JSON string rules. Single-quoted elements
/// accept `\'` for a literal quote and otherwise the same escapes.
pub fn parse_string_list(spec: &str) -> std::result::Result<Vec<String>, String> {
    let inner = spec
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| "list must be enclosed in brackets".to_string())?;

    let mut chars = inner.chars().peekable();
    let mut values = Vec::new();

    skip_whitespace(&mut chars);
    if chars.peek().is_none() {
        return Ok(values);
    }

    loop {
        skip_whitespace(&mut chars);
        let quote = match chars.next() {
            Some(quote @ ('\'' | '"')) => quote,
            Some(other) => {
                return Err(format!("expected a quoted string, found '{other}'"));
            }
            None => return Err("expected a quoted string after ','".to_string()),
        };

        let mut body = String::new();
        let mut closed = false;
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => {
                    let escaped = chars
                        .next()
                        .ok_or_else(|| "unterminated escape sequence".to_string())?;
                    if quote == '\'' && escaped == '\'' {
                        body.push('\'');
                    } else {
                        body.push('\\');
                        body.push(escaped);
                    }
                }
                '"' if quote == '\'' => body.push_str("\\\""),
                ch if ch == quote => {
                    closed = true;
                    break;
                }
                ch => body.push(ch),
            }
        }
        if !closed {
            return Err("unterminated string literal".to_string());
        }

        let value: String = serde_json::from_str(&format!("\"{body}\""))
            .map_err(|err| format!("invalid string literal: {err}"))?;
        values.push(value);

        skip_whitespace(&mut chars);
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(other) => return Err(format!("expected ',' or ']', found '{other}'")),
        }
    }

    Ok(values)
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.next_if(|ch| ch.is_whitespace()).is_some() {}
}
