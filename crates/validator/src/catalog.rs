//! The closed catalog of built-in rule names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A built-in rule, spelled in the rule grammar as its snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    Required,
    Nullable,
    Email,
    String,
    Numeric,
    Integer,
    Boolean,
    Min,
    Max,
    Between,
    Confirmed,
    Same,
    Regex,
    Url,
    Date,
    After,
    Before,
    Alpha,
    AlphaNum,
    In,
    NotIn,
    Size,
    Digits,
    DigitsBetween,
    StartsWith,
    EndsWith,
}

impl RuleName {
    /// Every built-in rule, in catalog order.
    pub const ALL: [RuleName; 26] = [
        Self::Required,
        Self::Nullable,
        Self::Email,
        Self::String,
        Self::Numeric,
        Self::Integer,
        Self::Boolean,
        Self::Min,
        Self::Max,
        Self::Between,
        Self::Confirmed,
        Self::Same,
        Self::Regex,
        Self::Url,
        Self::Date,
        Self::After,
        Self::Before,
        Self::Alpha,
        Self::AlphaNum,
        Self::In,
        Self::NotIn,
        Self::Size,
        Self::Digits,
        Self::DigitsBetween,
        Self::StartsWith,
        Self::EndsWith,
    ];

    /// The grammar spelling of this rule.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Nullable => "nullable",
            Self::Email => "email",
            Self::String => "string",
            Self::Numeric => "numeric",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Min => "min",
            Self::Max => "max",
            Self::Between => "between",
            Self::Confirmed => "confirmed",
            Self::Same => "same",
            Self::Regex => "regex",
            Self::Url => "url",
            Self::Date => "date",
            Self::After => "after",
            Self::Before => "before",
            Self::Alpha => "alpha",
            Self::AlphaNum => "alpha_num",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Size => "size",
            Self::Digits => "digits",
            Self::DigitsBetween => "digits_between",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
        }
    }

    /// Rules whose presence makes size-type rules compare numeric text by value.
    pub const fn marks_numeric(self) -> bool {
        matches!(self, Self::Numeric | Self::Integer)
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name is not part of the built-in catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a built-in rule")]
pub struct NotBuiltin(pub String);

impl FromStr for RuleName {
    type Err = NotBuiltin;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| NotBuiltin(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_round_trips() {
        for rule in RuleName::ALL {
            assert_eq!(rule.as_str().parse::<RuleName>(), Ok(rule));
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("Required".parse::<RuleName>().is_err());
        assert_eq!(
            "emial".parse::<RuleName>(),
            Err(NotBuiltin("emial".into()))
        );
    }

    #[test]
    fn serde_uses_grammar_spelling() {
        let json = serde_json::to_string(&RuleName::DigitsBetween).unwrap();
        assert_eq!(json, r#""digits_between""#);
    }

    #[test]
    fn only_numeric_and_integer_mark_numeric_fields() {
        let marking: Vec<_> = RuleName::ALL
            .into_iter()
            .filter(|r| r.marks_numeric())
            .collect();
        assert_eq!(marking, [RuleName::Numeric, RuleName::Integer]);
    }
}
