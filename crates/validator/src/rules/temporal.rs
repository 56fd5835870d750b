//! Date rules: `date`, `after`, `before`.
//!
//! Accepted forms: RFC 3339, RFC 2822, `YYYY-MM-DDTHH:MM[:SS[.fff]]`,
//! `YYYY-MM-DD HH:MM[:SS[.fff]]`, `YYYY-MM-DD`, `YYYY-MM`, and `YYYY`.
//! Forms without an offset are read as UTC.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::foundation::{Predicate, SpecError, value};
use crate::rules::RuleInput;

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a date or date-time in one of the accepted forms.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    let date = match text.len() {
        4 if text.bytes().all(|b| b.is_ascii_digit()) => {
            NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1)
        }
        7 => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
    }?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

fn parse_value(v: &Value) -> Option<DateTime<Utc>> {
    parse_date(&value::to_text(v))
}

/// `date`: empty passes, anything else must parse as a date.
pub fn date(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("date", |v, _| {
        if value::is_empty(v) {
            return None;
        }
        parse_value(v).is_none().then_some("Invalid date.".into())
    }))
}

/// `after:ref`: strictly later than `ref`.
///
/// `ref` is a date literal when it parses as one, otherwise the name of a
/// sibling field whose value is parsed as a date.
pub fn after(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    relative("after", Ordering::Greater, input)
}

/// `before:ref`: strictly earlier than `ref`. See [`after`].
pub fn before(input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    relative("before", Ordering::Less, input)
}

fn relative(
    rule: &'static str,
    wanted: Ordering,
    input: &RuleInput<'_>,
) -> Result<Predicate, SpecError> {
    let reference = input.text(0)?.to_owned();
    let literal = parse_date(&reference);
    Ok(Predicate::named(rule, move |v, record| {
        if value::is_empty(v) {
            return None;
        }
        let Some(candidate) = parse_value(v) else {
            return Some("Invalid date.".into());
        };
        let Some(bound) = literal.or_else(|| parse_value(value::field(record, &reference)))
        else {
            return Some("Invalid date.".into());
        };
        (candidate.cmp(&bound) != wanted)
            .then(|| format!("Date must be {rule} {reference}.").into())
    }))
}
