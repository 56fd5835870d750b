//! Engine configuration.

use serde::{Deserialize, Serialize};

/// What the builder does with a `regex` rule whose pattern does not compile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternPolicy {
    /// Fail the build with [`SpecError::InvalidPattern`](crate::SpecError::InvalidPattern).
    #[default]
    Propagate,
    /// Keep going; present values of the field fail with `Invalid format.`.
    Message,
}

/// How rule specifications are turned into predicates.
///
/// # Examples
///
/// ```
/// use rulebook_validator::{PatternPolicy, ValidatorConfig};
///
/// let config: ValidatorConfig = toml::from_str(r#"invalid_pattern = "message""#).unwrap();
/// assert!(!config.strict);
/// assert_eq!(config.invalid_pattern, PatternPolicy::Message);
///
/// let strict = ValidatorConfig::default().with_strict(true);
/// assert!(strict.strict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Report unknown rule names and malformed rule arguments as errors
    /// instead of dropping the offending token.
    pub strict: bool,
    /// Handling of `regex` patterns that do not compile.
    pub invalid_pattern: PatternPolicy,
}

impl ValidatorConfig {
    /// Sets strict mode.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the malformed-pattern policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_invalid_pattern(mut self, policy: PatternPolicy) -> Self {
        self.invalid_pattern = policy;
        self
    }
}
