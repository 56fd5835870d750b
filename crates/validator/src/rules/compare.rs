//! Comparison rules: against sibling fields, fixed lists, and patterns.

use crate::foundation::{Predicate, SpecError, value};
use crate::rules::RuleInput;

// ============================================================================
// SIBLING FIELDS
// ============================================================================

/// `confirmed`: the record's `<field>_confirmation` equals the value.
///
/// Binds to the field being validated, not to an argument.
pub fn confirmed(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let other = format!("{}_confirmation", input.field);
    Ok(Predicate::named("confirmed", move |v, record| {
        (value::field(record, &other) != v).then_some("Fields do not match.".into())
    }))
}

/// `same:other`: the record's `other` field equals the value.
pub fn same(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let other = input.text(0)?.to_owned();
    Ok(Predicate::named("same", move |v, record| {
        (value::field(record, &other) != v).then_some("Fields do not match.".into())
    }))
}

// ============================================================================
// LISTS
// ============================================================================

/// `in:a,b,...`: the value's text is one of the listed values.
pub fn one_of(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let allowed = input.texts();
    let listed = allowed.join(", ");
    Ok(Predicate::named("in", move |v, _| {
        let text = value::to_text(v);
        (!allowed.iter().any(|a| *a == text))
            .then(|| format!("Value must be one of: {listed}.").into())
    }))
}

/// `not_in:a,b,...`: the value's text is none of the listed values.
pub fn none_of(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let forbidden = input.texts();
    Ok(Predicate::named("not_in", move |v, _| {
        let text = value::to_text(v);
        forbidden
            .iter()
            .any(|f| *f == text)
            .then_some("Invalid value.".into())
    }))
}

/// `starts_with:a,b,...`: empty passes, otherwise some prefix must match.
pub fn starts_with(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let prefixes = input.texts();
    let listed = prefixes.join(", ");
    Ok(Predicate::named("starts_with", move |v, _| {
        if value::is_empty(v) {
            return None;
        }
        let text = value::to_text(v);
        (!prefixes.iter().any(|p| text.starts_with(p.as_str())))
            .then(|| format!("Must start with one of: {listed}").into())
    }))
}

/// `ends_with:a,b,...`: empty passes, otherwise some suffix must match.
pub fn ends_with(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    let suffixes = input.texts();
    let listed = suffixes.join(", ");
    Ok(Predicate::named("ends_with", move |v, _| {
        if value::is_empty(v) {
            return None;
        }
        let text = value::to_text(v);
        (!suffixes.iter().any(|s| text.ends_with(s.as_str())))
            .then(|| format!("Must end with one of: {listed}").into())
    }))
}

// ============================================================================
// PATTERN
// ============================================================================

/// `regex:pattern`: absent values pass, otherwise the pattern must match
/// somewhere in the value's text. Anchor it to match the whole value.
///
/// The argument splitter cuts at commas, so the pieces are joined back with
/// `,` and `^\d{2,4}$` arrives intact. Whitespace around each comma is
/// trimmed away.
///
/// The pattern is compiled when the rule is built; a pattern that does not
/// compile is a [`SpecError::InvalidPattern`]. Patterns are not vetted for
/// cost, so only accept them from trusted sources.
pub fn regex(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    input.text(0)?;
    let pattern = input.texts().join(",");
    let re = ::regex::Regex::new(&pattern).map_err(|source| SpecError::InvalidPattern {
        field: input.field.to_owned(),
        pattern: pattern.clone(),
        source,
    })?;
    Ok(Predicate::named("regex", move |v, _| {
        if value::is_absent(v) {
            return None;
        }
        (!re.is_match(&value::to_text(v))).then_some("Invalid format.".into())
    }))
}

/// The stand-in for a `regex` rule whose pattern did not compile, used when
/// bad patterns are configured to fail the field instead of the build.
pub fn unusable_pattern() -> Predicate {
    Predicate::named("regex", |v, _| {
        (!value::is_absent(v)).then_some("Invalid format.".into())
    })
}
