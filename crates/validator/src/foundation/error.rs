//! Errors for specifications that cannot be turned into predicates.
//!
//! A field failing its rules is not an error: it produces a message. These
//! variants describe a broken specification, the kind of fault a developer
//! fixes in code or configuration rather than a user fixes in a form.

/// A fault in a field's rule specification.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// A rule name that is neither registered nor a fallback rule.
    ///
    /// Only raised in strict mode; lenient mode drops the token.
    #[error("field `{field}`: unknown rule `{name}`")]
    UnknownRule {
        /// The field whose specification names the rule.
        field: String,
        /// The rule name as written.
        name: String,
    },

    /// A rule was written without the arguments it needs.
    #[error("field `{field}`: rule `{rule}` expects {expected}")]
    MissingArgument {
        /// The field whose specification names the rule.
        field: String,
        /// The rule name.
        rule: String,
        /// What the rule expects, e.g. "a numeric argument".
        expected: &'static str,
    },

    /// A rule that compares numbers received an argument that is not one.
    #[error("field `{field}`: rule `{rule}` expects a number, got `{value}`")]
    InvalidArgument {
        /// The field whose specification names the rule.
        field: String,
        /// The rule name.
        rule: String,
        /// The offending argument text.
        value: String,
    },

    /// The `regex` rule received a pattern that does not compile.
    #[error("field `{field}`: invalid regex pattern `{pattern}`")]
    InvalidPattern {
        /// The field whose specification names the rule.
        field: String,
        /// The pattern as written.
        pattern: String,
        /// The compiler's complaint.
        #[source]
        source: regex::Error,
    },
}

impl SpecError {
    /// The field whose specification is at fault.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownRule { field, .. }
            | Self::MissingArgument { field, .. }
            | Self::InvalidArgument { field, .. }
            | Self::InvalidPattern { field, .. } => field,
        }
    }

    /// Whether this is a malformed `regex` pattern.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_display() {
        let err = SpecError::UnknownRule {
            field: "email".into(),
            name: "emial".into(),
        };
        assert_eq!(err.to_string(), "field `email`: unknown rule `emial`");
        assert_eq!(err.field(), "email");
        assert!(!err.is_invalid_pattern());
    }

    #[test]
    fn invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = SpecError::InvalidPattern {
            field: "code".into(),
            pattern: "(".into(),
            source,
        };
        assert!(err.is_invalid_pattern());
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "field `code`: invalid regex pattern `(`");
    }

    #[test]
    fn missing_argument_display() {
        let err = SpecError::MissingArgument {
            field: "age".into(),
            rule: "min".into(),
            expected: "a numeric argument",
        };
        assert_eq!(
            err.to_string(),
            "field `age`: rule `min` expects a numeric argument"
        );
    }
}
