//! Format and type rules.

use std::sync::LazyLock;

use serde_json::Value;

use crate::foundation::{Predicate, SpecError, value};
use crate::rules::RuleInput;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

// ============================================================================
// EMAIL
// ============================================================================

/// `email`: a `local@domain.tld` shape. Unlike most rules, empty fails.
pub fn email(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("email", |v, _| {
        let ok = !value::is_empty(v) && EMAIL_REGEX.is_match(&value::to_text(v));
        (!ok).then_some("Invalid email address.".into())
    }))
}

// ============================================================================
// TYPES
// ============================================================================

/// `string`: empty or textual.
pub fn string(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("string", |v, _| {
        let ok = value::is_empty(v) || v.is_string();
        (!ok).then_some("The field must be a string.".into())
    }))
}

/// `numeric`: empty, a number, or text that parses as a finite number.
pub fn numeric(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("numeric", |v, _| {
        let ok = value::is_empty(v) || value::as_number(v).is_some();
        (!ok).then_some("The field must be numeric.".into())
    }))
}

/// `integer`: empty, or the numeric coercion of the value has no
/// fractional part.
pub fn integer(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("integer", |v, _| {
        let ok = value::is_empty(v) || value::as_number(v).is_some_and(|n| n.fract() == 0.0);
        (!ok).then_some("The field must be an integer.".into())
    }))
}

/// `boolean`: empty, `true`/`false`, or exactly the number 0 or 1.
pub fn boolean(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("boolean", |v, _| {
        let ok = match v {
            Value::Bool(_) => true,
            Value::Number(n) => matches!(n.as_f64(), Some(x) if x == 0.0 || x == 1.0),
            other => value::is_empty(other),
        };
        (!ok).then_some("The field must be boolean.".into())
    }))
}

// ============================================================================
// URL
// ============================================================================

/// `url`: empty passes, anything else must parse as an absolute URL.
pub fn url(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("url", |v, _| {
        if value::is_empty(v) {
            return None;
        }
        ::url::Url::parse(&value::to_text(v))
            .is_err()
            .then_some("Invalid URL.".into())
    }))
}

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

/// `alpha`: empty passes, otherwise ASCII letters only.
pub fn alpha(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("alpha", |v, _| {
        if value::is_empty(v) {
            return None;
        }
        let ok = value::to_text(v).chars().all(|c| c.is_ascii_alphabetic());
        (!ok).then_some("Only alphabetic characters allowed.".into())
    }))
}

/// `alpha_num`: empty passes, otherwise ASCII letters and digits only.
pub fn alpha_num(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("alpha_num", |v, _| {
        if value::is_empty(v) {
            return None;
        }
        let ok = value::to_text(v).chars().all(|c| c.is_ascii_alphanumeric());
        (!ok).then_some("Only alphanumeric characters allowed.".into())
    }))
}
