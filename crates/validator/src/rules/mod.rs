//! Built-in rule factories
//!
//! Each built-in rule is a factory: it takes the bound arguments of one rule
//! token and returns a [`Predicate`]. Factories validate their arguments up
//! front, so a predicate never has to deal with a missing bound.
//!
//! # Categories
//!
//! - **Presence**: `required`, `nullable`
//! - **Format**: `email`, `string`, `numeric`, `integer`, `boolean`, `url`,
//!   `alpha`, `alpha_num`
//! - **Size**: `min`, `max`, `between`, `size`, `digits`, `digits_between`
//! - **Comparison**: `confirmed`, `same`, `in`, `not_in`, `starts_with`,
//!   `ends_with`, `regex`
//! - **Temporal**: `date`, `after`, `before`

pub mod compare;
pub mod format;
pub mod presence;
pub mod size;
pub mod temporal;

use std::fmt;

use crate::catalog::RuleName;
use crate::foundation::{Predicate, SpecError, value};

/// A factory for one built-in rule.
pub type BuiltinFactory = fn(&RuleInput<'_>) -> Result<Predicate, SpecError>;

// ============================================================================
// ARGUMENTS
// ============================================================================

/// A rule argument after coercion.
///
/// Text that parses as a finite number becomes [`RuleArg::Number`]; the raw
/// text is kept so list rules (`in:007`) still see what was written.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleArg {
    /// A finite number and the text it was parsed from.
    Number { value: f64, raw: String },
    /// Anything else.
    Text(String),
}

impl RuleArg {
    /// Coerces one raw argument.
    pub fn coerce(raw: &str) -> Self {
        match value::parse_finite(raw) {
            Some(value) => Self::Number {
                value,
                raw: raw.to_owned(),
            },
            None => Self::Text(raw.to_owned()),
        }
    }

    /// The numeric value, for numeric arguments.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number { value, .. } => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// The argument as written.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Number { raw, .. } => raw,
            Self::Text(text) => text,
        }
    }
}

impl fmt::Display for RuleArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => f.write_str(&value::format_number(*value)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

// ============================================================================
// FACTORY INPUT
// ============================================================================

/// Everything a factory may bind into its predicate.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// The rule name as written in the specification.
    pub rule: &'a str,
    /// The field being validated. `confirmed` binds to it.
    pub field: &'a str,
    /// Coerced arguments in source order.
    pub args: &'a [RuleArg],
    /// Whether the field also declares `numeric` or `integer`.
    pub numeric_field: bool,
}

impl<'a> RuleInput<'a> {
    /// Builds an input for a field without the numeric marker.
    pub fn new(rule: &'a str, field: &'a str, args: &'a [RuleArg]) -> Self {
        Self {
            rule,
            field,
            args,
            numeric_field: false,
        }
    }

    /// Marks the field as numeric.
    #[must_use = "builder methods must be chained or built"]
    pub fn numeric(mut self, numeric_field: bool) -> Self {
        self.numeric_field = numeric_field;
        self
    }

    /// The numeric argument at `index`.
    pub fn number(&self, index: usize) -> Result<f64, SpecError> {
        let arg = self.args.get(index).ok_or_else(|| SpecError::MissingArgument {
            field: self.field.to_owned(),
            rule: self.rule.to_owned(),
            expected: "a numeric argument",
        })?;
        arg.as_number().ok_or_else(|| SpecError::InvalidArgument {
            field: self.field.to_owned(),
            rule: self.rule.to_owned(),
            value: arg.as_str().to_owned(),
        })
    }

    /// The non-empty text argument at `index`.
    pub fn text(&self, index: usize) -> Result<&'a str, SpecError> {
        self.args
            .get(index)
            .map(RuleArg::as_str)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| SpecError::MissingArgument {
                field: self.field.to_owned(),
                rule: self.rule.to_owned(),
                expected: "a text argument",
            })
    }

    /// All arguments as written.
    pub fn texts(&self) -> Vec<String> {
        self.args.iter().map(|arg| arg.as_str().to_owned()).collect()
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// The factory behind a built-in rule.
pub fn factory(rule: RuleName) -> BuiltinFactory {
    match rule {
        RuleName::Required => presence::required,
        RuleName::Nullable => presence::nullable,
        RuleName::Email => format::email,
        RuleName::String => format::string,
        RuleName::Numeric => format::numeric,
        RuleName::Integer => format::integer,
        RuleName::Boolean => format::boolean,
        RuleName::Min => size::min,
        RuleName::Max => size::max,
        RuleName::Between => size::between,
        RuleName::Confirmed => compare::confirmed,
        RuleName::Same => compare::same,
        RuleName::Regex => compare::regex,
        RuleName::Url => format::url,
        RuleName::Date => temporal::date,
        RuleName::After => temporal::after,
        RuleName::Before => temporal::before,
        RuleName::Alpha => format::alpha,
        RuleName::AlphaNum => format::alpha_num,
        RuleName::In => compare::one_of,
        RuleName::NotIn => compare::none_of,
        RuleName::Size => size::size,
        RuleName::Digits => size::digits,
        RuleName::DigitsBetween => size::digits_between,
        RuleName::StartsWith => compare::starts_with,
        RuleName::EndsWith => compare::ends_with,
    }
}

/// Rules that resolve even when a registry does not carry them.
pub fn fallback(name: &str) -> Option<BuiltinFactory> {
    match name {
        "in" => Some(compare::one_of),
        "not_in" => Some(compare::none_of),
        _ => None,
    }
}

// ============================================================================
// TEST SUPPORT
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_coerce_numbers_and_keep_raw_text() {
        let arg = RuleArg::coerce("08");
        assert_eq!(arg.as_number(), Some(8.0));
        assert_eq!(arg.as_str(), "08");
        assert_eq!(arg.to_string(), "8");

        let arg = RuleArg::coerce("admin");
        assert_eq!(arg.as_number(), None);
        assert_eq!(arg.to_string(), "admin");
    }

    #[test]
    fn missing_and_invalid_numbers_are_spec_errors() {
        let args = [RuleArg::coerce("abc")];
        let input = RuleInput::new("min", "age", &args);
        assert!(matches!(
            input.number(0),
            Err(SpecError::InvalidArgument { value, .. }) if value == "abc"
        ));
        assert!(matches!(
            input.number(1),
            Err(SpecError::MissingArgument { rule, .. }) if rule == "min"
        ));
    }

    #[test]
    fn every_builtin_has_a_factory() {
        let args = [RuleArg::coerce("1"), RuleArg::coerce("2")];
        for rule in RuleName::ALL {
            let input = RuleInput::new(rule.as_str(), "field", &args);
            let predicate = factory(rule)(&input).expect("builds with two numeric args");
            assert_eq!(predicate.name(), rule.as_str());
        }
    }

    #[test]
    fn fallback_covers_list_rules_only() {
        assert!(fallback("in").is_some());
        assert!(fallback("not_in").is_some());
        assert!(fallback("required").is_none());
    }
}
