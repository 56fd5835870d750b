//! Rule-string tokenizer.
//!
//! Grammar:
//!
//! ```text
//! expr    := segment ("|" segment)*
//! segment := name (":" arglist)?
//! arglist := arg ("," arg)*
//! ```
//!
//! Whitespace around segments, names, and arguments is trimmed. Only the
//! first `:` of a segment separates the name from its arguments.

use serde::Serialize;
use smallvec::SmallVec;

use crate::catalog::RuleName;

/// One `name:args` segment of a rule string.
///
/// Arguments stay untyped text here; numeric coercion happens when the
/// token is bound to a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleToken {
    /// The rule name as written. Unknown names are kept.
    pub name: String,
    /// Arguments in source order.
    pub args: SmallVec<[String; 2]>,
}

impl RuleToken {
    /// The built-in rule this token names, if any.
    pub fn rule(&self) -> Option<RuleName> {
        self.name.parse().ok()
    }

    /// The first argument, if present.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Splits a rule string into tokens, preserving order.
///
/// Empty segments are skipped and empty input yields no tokens.
///
/// # Examples
///
/// ```
/// use rulebook_validator::parse_rule_string;
///
/// let tokens = parse_rule_string("required|min:8|in:admin, user");
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1].name, "min");
/// assert_eq!(tokens[1].args.as_slice(), ["8"]);
/// assert_eq!(tokens[2].args.as_slice(), ["admin", "user"]);
/// ```
pub fn parse_rule_string(expr: &str) -> Vec<RuleToken> {
    expr.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_segment)
        .collect()
}

fn parse_segment(segment: &str) -> RuleToken {
    let Some((name, raw_args)) = segment.split_once(':') else {
        return RuleToken {
            name: segment.to_owned(),
            args: SmallVec::new(),
        };
    };

    let args = if raw_args.trim().is_empty() {
        SmallVec::new()
    } else {
        raw_args.split(',').map(|arg| arg.trim().to_owned()).collect()
    };

    RuleToken {
        name: name.trim().to_owned(),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(expr: &str) -> Vec<String> {
        parse_rule_string(expr).into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn splits_segments_in_order() {
        assert_eq!(names("required|email|max:255"), ["required", "email", "max"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_rule_string("").is_empty());
        assert!(parse_rule_string("  |  | ").is_empty());
    }

    #[test]
    fn only_first_colon_splits_name() {
        let tokens = parse_rule_string("regex:^\\d{2}:\\d{2}$");
        assert_eq!(tokens[0].name, "regex");
        assert_eq!(tokens[0].args.as_slice(), ["^\\d{2}:\\d{2}$"]);
    }

    #[test]
    fn trailing_colon_means_no_args() {
        let tokens = parse_rule_string("min:");
        assert!(tokens[0].args.is_empty());
    }

    #[test]
    fn unknown_names_are_kept() {
        let tokens = parse_rule_string("uppercase|required");
        assert_eq!(tokens[0].name, "uppercase");
        assert_eq!(tokens[0].rule(), None);
        assert_eq!(tokens[1].rule(), Some(RuleName::Required));
    }

    #[test]
    fn whitespace_is_trimmed_everywhere() {
        let tokens = parse_rule_string(" between : 1 , 10 | nullable ");
        assert_eq!(tokens[0].name, "between");
        assert_eq!(tokens[0].args.as_slice(), ["1", "10"]);
        assert_eq!(tokens[1].name, "nullable");
    }
}
