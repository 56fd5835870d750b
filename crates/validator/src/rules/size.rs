//! Size rules: `min`, `max`, `between`, `size`, `digits`, `digits_between`.
//!
//! Text and arrays are measured by length and numbers by value. On a field
//! that also declares `numeric` or `integer`, numeric text is measured by
//! value too, so `"17"` and `17` get the same verdict there. `between`
//! always measures numeric text by value.

use serde_json::Value;

use crate::foundation::{Predicate, SpecError, value};
use crate::rules::RuleInput;

// ============================================================================
// MEASUREMENT
// ============================================================================

/// How a value is compared against a size bound.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Measure {
    Absent,
    Length(usize),
    Value(f64),
    Unmeasurable,
}

fn measure(v: &Value, numeric_field: bool) -> Measure {
    match v {
        Value::Null => Measure::Absent,
        Value::Number(_) => value::as_number(v).map_or(Measure::Unmeasurable, Measure::Value),
        Value::String(s) if numeric_field => match value::parse_finite(s) {
            Some(n) => Measure::Value(n),
            None => Measure::Length(s.chars().count()),
        },
        Value::String(_) | Value::Array(_) => {
            value::length(v).map_or(Measure::Unmeasurable, Measure::Length)
        }
        Value::Bool(_) | Value::Object(_) => Measure::Unmeasurable,
    }
}

// ============================================================================
// MIN / MAX / BETWEEN / SIZE
// ============================================================================

/// `min:n`: length or value at least `n`. Absent values fail.
pub fn min(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let bound = input.number(0)?;
    let shown = value::format_number(bound);
    let numeric_field = input.numeric_field;
    Ok(Predicate::named("min", move |v, _| match measure(v, numeric_field) {
        Measure::Absent => Some(format!("Must be at least {shown} characters.").into()),
        Measure::Length(len) if len as f64 >= bound => None,
        Measure::Length(_) => Some(format!("Must be at least {shown} characters.").into()),
        Measure::Value(n) if n >= bound => None,
        Measure::Value(_) | Measure::Unmeasurable => {
            Some(format!("Must be at least {shown}.").into())
        }
    }))
}

/// `max:n`: length or value at most `n`. Absent values pass.
pub fn max(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let bound = input.number(0)?;
    let shown = value::format_number(bound);
    let numeric_field = input.numeric_field;
    Ok(Predicate::named("max", move |v, _| match measure(v, numeric_field) {
        Measure::Absent | Measure::Unmeasurable => None,
        Measure::Length(len) if len as f64 <= bound => None,
        Measure::Length(_) => Some(format!("Must be no more than {shown} characters.").into()),
        Measure::Value(n) if n <= bound => None,
        Measure::Value(_) => Some(format!("Must be no more than {shown}.").into()),
    }))
}

/// `between:lo,hi`: value or length within `[lo, hi]`. Absent values pass.
///
/// Numeric text is compared by value on any field, so `"50"` fails
/// `between:1,10` just as `50` does.
pub fn between(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let lo = input.number(0)?;
    let hi = input.number(1)?;
    let (lo_shown, hi_shown) = (value::format_number(lo), value::format_number(hi));
    Ok(Predicate::named("between", move |v, _| {
        let within = |x: f64| x >= lo && x <= hi;
        match measure(v, true) {
            Measure::Absent | Measure::Unmeasurable => None,
            Measure::Length(len) if within(len as f64) => None,
            Measure::Length(_) => {
                Some(format!("Length must be between {lo_shown} and {hi_shown}.").into())
            }
            Measure::Value(n) if within(n) => None,
            Measure::Value(_) => Some(format!("Must be between {lo_shown} and {hi_shown}.").into()),
        }
    }))
}

/// `size:n`: exact length or exact value.
pub fn size(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let expected = input.number(0)?;
    let shown = value::format_number(expected);
    let numeric_field = input.numeric_field;
    Ok(Predicate::named("size", move |v, _| match measure(v, numeric_field) {
        Measure::Length(len) if len as f64 == expected => None,
        Measure::Length(_) => Some(format!("Length must be {shown}.").into()),
        Measure::Value(n) if n == expected => None,
        Measure::Value(_) | Measure::Absent | Measure::Unmeasurable => {
            Some(format!("Value must be {shown}.").into())
        }
    }))
}

// ============================================================================
// DIGITS
// ============================================================================

fn digit_count(v: &Value) -> Option<usize> {
    let text = value::to_text(v);
    (!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())).then_some(text.len())
}

/// `digits:n`: exactly `n` decimal digits and nothing else.
pub fn digits(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let expected = input.number(0)?;
    let shown = value::format_number(expected);
    Ok(Predicate::named("digits", move |v, _| match digit_count(v) {
        Some(count) if count as f64 == expected => None,
        _ => Some(format!("Must be {shown} digits.").into()),
    }))
}

/// `digits_between:lo,hi`: only decimal digits, between `lo` and `hi` of them.
pub fn digits_between(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let lo = input.number(0)?;
    let hi = input.number(1)?;
    let (lo_shown, hi_shown) = (value::format_number(lo), value::format_number(hi));
    Ok(Predicate::named("digits_between", move |v, _| {
        let Some(count) = digit_count(v) else {
            return Some("Must be digits.".into());
        };
        let count = count as f64;
        if count >= lo && count <= hi {
            None
        } else {
            Some(format!("Digits length must be between {lo_shown} and {hi_shown}.").into())
        }
    }))
}
