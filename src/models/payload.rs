// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request payload validation shared by all resources.
//!
//! Each resource reads its fields through a [`FieldReader`], which collects
//! every problem before failing so clients get all field errors at once.

use crate::error::FieldErrors;
use crate::list_field;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use validator::ValidateEmail;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const NOT_STRING: &str = "Not a valid string.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_NUMBER: &str = "A valid number is required.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";
pub const INVALID_DATE: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Maximum length of an email address.
const EMAIL_MAX_LENGTH: usize = 254;

/// A JSON object submitted for create or update.
#[derive(Debug)]
pub struct Payload<'a> {
    fields: &'a Map<String, Value>,
    partial: bool,
}

impl<'a> Payload<'a> {
    /// Wrap a request body, rejecting anything that is not a JSON object.
    pub fn from_value(value: &'a Value) -> Result<Self, FieldErrors> {
        match value {
            Value::Object(fields) => Ok(Self {
                fields,
                partial: false,
            }),
            other => Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(other)
                ),
            )),
        }
    }

    /// Mark the payload as a partial update: absent fields are not required.
    pub fn partial(self) -> Self {
        Self {
            partial: true,
            ..self
        }
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Constraints on a text field.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub max_length: Option<usize>,
    pub allow_blank: bool,
}

impl TextRule {
    /// Non-blank text of at most `max_length` characters.
    pub const fn limited(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
            allow_blank: false,
        }
    }

    /// Non-blank text without a length limit.
    pub const fn unlimited() -> Self {
        Self {
            max_length: None,
            allow_blank: false,
        }
    }

    pub const fn blank_ok(self) -> Self {
        Self {
            allow_blank: true,
            ..self
        }
    }
}

/// Reads typed fields out of a [`Payload`], accumulating errors.
///
/// A field absent from the payload resolves as follows:
/// - partial update: the current value;
/// - field with a default: the current value if there is one, else the default;
/// - otherwise it is reported as required.
pub struct FieldReader<'p, 'a> {
    payload: &'p Payload<'a>,
    errors: FieldErrors,
}

impl<'p, 'a> FieldReader<'p, 'a> {
    pub fn new(payload: &'p Payload<'a>) -> Self {
        Self {
            payload,
            errors: FieldErrors::new(),
        }
    }

    /// Fail with every collected error, if any.
    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn read<T, F>(
        &mut self,
        field: &str,
        current: Option<T>,
        default: Option<T>,
        parse: F,
    ) -> Option<T>
    where
        F: FnOnce(&Value) -> Result<T, String>,
    {
        let Some(raw) = self.payload.get(field) else {
            let fallback = if self.payload.is_partial() || default.is_some() {
                current.or(default)
            } else {
                None
            };
            if fallback.is_none() {
                self.errors.add(field, REQUIRED);
            }
            return fallback;
        };

        if raw.is_null() {
            self.errors.add(field, NOT_NULL);
            return None;
        }

        match parse(raw) {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.add(field, message);
                None
            }
        }
    }

    pub fn text(
        &mut self,
        field: &str,
        rule: TextRule,
        current: Option<&str>,
        default: Option<&str>,
    ) -> Option<String> {
        self.read(
            field,
            current.map(str::to_string),
            default.map(str::to_string),
            |raw| parse_text(raw, rule),
        )
    }

    pub fn email(&mut self, field: &str, current: Option<&str>) -> Option<String> {
        self.read(field, current.map(str::to_string), None, |raw| {
            let email = parse_text(raw, TextRule::limited(EMAIL_MAX_LENGTH))?;
            if email.validate_email() {
                Ok(email)
            } else {
                Err(INVALID_EMAIL.to_string())
            }
        })
    }

    pub fn float(&mut self, field: &str, current: Option<f64>) -> Option<f64> {
        self.read(field, current, None, parse_float)
    }

    pub fn integer(
        &mut self,
        field: &str,
        current: Option<i64>,
        default: Option<i64>,
    ) -> Option<i64> {
        self.read(field, current, default, parse_integer)
    }

    pub fn date(&mut self, field: &str, current: Option<NaiveDate>) -> Option<NaiveDate> {
        self.read(field, current, None, |raw| {
            raw.as_str()
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
                .ok_or_else(|| INVALID_DATE.to_string())
        })
    }

    pub fn string_list(
        &mut self,
        field: &str,
        current: Option<&[String]>,
        default: Option<Vec<String>>,
    ) -> Option<Vec<String>> {
        self.read(field, current.map(<[String]>::to_vec), default, |raw| {
            list_field::coerce(raw).map_err(str::to_string)
        })
    }
}

/// Surrounding whitespace is stripped before any other check.
fn parse_text(raw: &Value, rule: TextRule) -> Result<String, String> {
    let text = raw.as_str().ok_or_else(|| NOT_STRING.to_string())?.trim();
    if !rule.allow_blank && text.is_empty() {
        return Err(NOT_BLANK.to_string());
    }
    if let Some(max) = rule.max_length {
        if text.chars().count() > max {
            return Err(format!(
                "Ensure this field has no more than {} characters.",
                max
            ));
        }
    }
    Ok(text.to_string())
}

fn parse_float(raw: &Value) -> Result<f64, String> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| INVALID_NUMBER.to_string())
}

fn parse_integer(raw: &Value) -> Result<i64, String> {
    let value = match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    value.ok_or_else(|| INVALID_INTEGER.to_string())
}
