//! Value coercions shared by every rule
//!
//! Rules never inspect `serde_json::Value` variants ad hoc. They go through
//! the helpers here so that, for example, `"5"` and `5` are classified the
//! same way by `numeric`, `integer`, and the size-type rules.

use std::borrow::Cow;

use serde_json::Value;

/// A record under validation: field name to current value.
pub type Record = serde_json::Map<String, Value>;

static NULL: Value = Value::Null;

/// Reads a field from a record. Missing keys read as `null`.
#[inline]
pub fn field<'a>(record: &'a Record, name: &str) -> &'a Value {
    record.get(name).unwrap_or(&NULL)
}

/// Returns `true` for a missing or `null` value.
#[inline]
pub fn is_absent(value: &Value) -> bool {
    value.is_null()
}

/// Returns `true` for `null`, blank text, and empty arrays.
///
/// This is the one definition of "empty" used by `required`, by the
/// nullable short-circuit, and by every rule that lets empty values pass.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Parses text as a finite number.
///
/// Surrounding whitespace is ignored; empty text, `inf` and `NaN` are not
/// numbers.
pub fn parse_finite(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric coercion: numbers are themselves, text is numeric when it
/// parses as a finite number, nothing else is numeric.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_finite(s),
        _ => None,
    }
}

/// Length of text (in chars) or of an array. Other values have no length.
pub fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Formats a number the way it reads in a message: `8`, not `8.0`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Text coercion used by list, pattern, and digit rules.
///
/// `null` reads as empty text, arrays join their elements with `,`, and
/// objects render as compact JSON.
pub fn to_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::String(s) => Cow::Borrowed(s),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cow::Owned(i.to_string()),
            None => match n.as_u64() {
                Some(u) => Cow::Owned(u.to_string()),
                None => Cow::Owned(format_number(n.as_f64().unwrap_or_default())),
            },
        },
        Value::Array(items) => Cow::Owned(
            items
                .iter()
                .map(|item| to_text(item).into_owned())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Cow::Owned(value.to_string()),
    }
}
