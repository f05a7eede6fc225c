//! Table-driven payload validation.
//!
//! A schema is a slice of [`FieldSpec`]s. [`validate`] walks every field,
//! collects all violations, and only deserializes into the typed form once
//! the normalized object is known to be clean.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::error::{ApiError, FieldError, IssueCode};

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// String of at least `min_len` UTF-16 code units.
    Text {
        min_len: usize,
        message: &'static str,
    },
    Email {
        message: &'static str,
    },
    /// String restricted to a fixed set of literals.
    OneOf { values: &'static [&'static str] },
    /// Boolean that must be exactly `true`.
    MustBeTrue { message: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub enum Presence {
    Required,
    Optional,
    /// Absent values are filled with this literal.
    Default(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: Rule,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            rule,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            rule,
            presence: Presence::Optional,
        }
    }

    pub const fn with_default(name: &'static str, rule: Rule, default: &'static str) -> Self {
        Self {
            name,
            rule,
            presence: Presence::Default(default),
        }
    }
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII classes only: `(?i)` would fold in 'ſ' and the Kelvin sign.
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid regex")
});

pub fn is_valid_email(candidate: &str) -> bool {
    !candidate.starts_with('.') && !candidate.contains("..") && EMAIL.is_match(candidate)
}

/// Checks `input` against `schema` and returns the normalized object: only
/// schema fields are kept and defaults are filled in.
pub fn check(schema: &[FieldSpec], input: &Value) -> Result<Map<String, Value>, Vec<FieldError>> {
    let Some(object) = input.as_object() else {
        return Err(vec![FieldError::new(
            IssueCode::InvalidType,
            "",
            format!("Expected object, received {}", kind_of(input)),
        )]);
    };

    let mut normalized = Map::new();
    let mut errors = Vec::new();

    for spec in schema {
        match (object.get(spec.name), spec.presence) {
            (None, Presence::Required) => errors.push(FieldError::new(
                IssueCode::InvalidType,
                spec.name,
                "Required",
            )),
            (None, Presence::Optional) => {}
            (None, Presence::Default(default)) => {
                normalized.insert(spec.name.to_string(), Value::String(default.to_string()));
            }
            (Some(value), _) => match check_rule(spec, value) {
                Ok(()) => {
                    normalized.insert(spec.name.to_string(), value.clone());
                }
                Err(error) => errors.push(error),
            },
        }
    }

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(errors)
    }
}

/// Validates and deserializes `input` into `T`.
pub fn validate<T: DeserializeOwned>(schema: &[FieldSpec], input: &Value) -> Result<T, ApiError> {
    let normalized = check(schema, input).map_err(ApiError::validation)?;
    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| ApiError::internal(format!("validated payload did not deserialize: {e}")))
}

fn check_rule(spec: &FieldSpec, value: &Value) -> Result<(), FieldError> {
    match spec.rule {
        Rule::Text { min_len, message } => {
            let text = expect_string(spec.name, value)?;
            if text.encode_utf16().count() < min_len {
                return Err(FieldError::new(IssueCode::TooSmall, spec.name, message));
            }
        }
        Rule::Email { message } => {
            let text = expect_string(spec.name, value)?;
            if !is_valid_email(text) {
                return Err(FieldError::new(IssueCode::InvalidString, spec.name, message));
            }
        }
        Rule::OneOf { values } => {
            let expected = values
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(" | ");
            let Some(text) = value.as_str() else {
                return Err(FieldError::new(
                    IssueCode::InvalidType,
                    spec.name,
                    format!("Expected {expected}, received {}", kind_of(value)),
                ));
            };
            if !values.iter().any(|allowed| *allowed == text) {
                return Err(FieldError::new(
                    IssueCode::InvalidEnumValue,
                    spec.name,
                    format!("Invalid enum value. Expected {expected}, received '{text}'"),
                ));
            }
        }
        Rule::MustBeTrue { message } => match value {
            Value::Bool(true) => {}
            Value::Bool(false) => {
                return Err(FieldError::new(IssueCode::Custom, spec.name, message));
            }
            other => {
                return Err(FieldError::new(
                    IssueCode::InvalidType,
                    spec.name,
                    format!("Expected boolean, received {}", kind_of(other)),
                ));
            }
        },
    }
    Ok(())
}

fn expect_string<'a>(field: &str, value: &'a Value) -> Result<&'a str, FieldError> {
    value.as_str().ok_or_else(|| {
        FieldError::new(
            IssueCode::InvalidType,
            field,
            format!("Expected string, received {}", kind_of(value)),
        )
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
