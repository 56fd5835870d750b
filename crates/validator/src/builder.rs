//! Turns a [`FieldSpec`] into an ordered predicate sequence.
//!
//! Resolution order for each token is: the registry, then the `in`/`not_in`
//! fallbacks, then "unknown". Unknown names and tokens with unusable
//! arguments are dropped with a warning, or reported when the configuration
//! is strict. A `regex` pattern that does not compile follows
//! [`PatternPolicy`].

use serde_json::Value;
use smallvec::SmallVec;

use crate::catalog::RuleName;
use crate::config::{PatternPolicy, ValidatorConfig};
use crate::foundation::{Message, Predicate, Record, SpecError, SpecResult, value};
use crate::parser::{RuleToken, parse_rule_string};
use crate::registry::Registry;
use crate::rules::{self, RuleArg, RuleInput, compare};
use crate::spec::{FieldSpec, SpecItem};

/// The predicates of one field, ready to run.
#[derive(Debug, Clone)]
pub struct BuiltField {
    predicates: Vec<Predicate>,
    nullable: bool,
}

impl BuiltField {
    /// Predicates in evaluation order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Whether the spec names `nullable` anywhere.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether an empty value skips every predicate.
    pub fn skips(&self, value: &Value) -> bool {
        self.nullable && value::is_empty(value)
    }

    /// The first failing predicate and its message.
    pub fn first_failure(&self, value: &Value, record: &Record) -> Option<(&Predicate, Message)> {
        self.predicates
            .iter()
            .find_map(|p| p.check(value, record).map(|message| (p, message)))
    }

    /// Runs the field: the nullable short-circuit, then first failure wins.
    pub fn evaluate(&self, value: &Value, record: &Record) -> Option<Message> {
        if self.skips(value) {
            return None;
        }
        self.first_failure(value, record).map(|(_, message)| message)
    }
}

/// Resolves rule tokens against a registry.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorBuilder<'a> {
    registry: &'a Registry,
    config: &'a ValidatorConfig,
}

impl<'a> ValidatorBuilder<'a> {
    pub fn new(registry: &'a Registry, config: &'a ValidatorConfig) -> Self {
        Self { registry, config }
    }

    /// Builds the predicates for `field`.
    ///
    /// Rule strings and literal predicates keep their declared order.
    ///
    /// # Errors
    ///
    /// [`SpecError::InvalidPattern`] for a malformed `regex` pattern under
    /// [`PatternPolicy::Propagate`]. In strict mode also
    /// [`SpecError::UnknownRule`] and the argument errors.
    pub fn build(&self, field: &str, spec: &FieldSpec) -> SpecResult<BuiltField> {
        let tokens = spec.tokens();
        let numeric_field = tokens
            .iter()
            .filter_map(RuleToken::rule)
            .any(RuleName::marks_numeric);
        let nullable = tokens
            .iter()
            .any(|token| token.name == RuleName::Nullable.as_str());

        let mut predicates = Vec::with_capacity(tokens.len());
        match spec {
            FieldSpec::Rules(_) => {
                self.push_tokens(field, &tokens, numeric_field, &mut predicates)?;
            }
            FieldSpec::List(items) => {
                for item in items {
                    match item {
                        SpecItem::Rules(expr) => {
                            let tokens = parse_rule_string(expr);
                            self.push_tokens(field, &tokens, numeric_field, &mut predicates)?;
                        }
                        SpecItem::Predicate(predicate) => predicates.push(predicate.clone()),
                    }
                }
            }
        }

        Ok(BuiltField {
            predicates,
            nullable,
        })
    }

    fn push_tokens(
        &self,
        field: &str,
        tokens: &[RuleToken],
        numeric_field: bool,
        out: &mut Vec<Predicate>,
    ) -> SpecResult<()> {
        for token in tokens {
            if let Some(predicate) = self.resolve(field, token, numeric_field)? {
                out.push(predicate);
            }
        }
        Ok(())
    }

    /// One token to at most one predicate. `Ok(None)` means dropped.
    fn resolve(
        &self,
        field: &str,
        token: &RuleToken,
        numeric_field: bool,
    ) -> SpecResult<Option<Predicate>> {
        let args: SmallVec<[RuleArg; 2]> = token.args.iter().map(|a| RuleArg::coerce(a)).collect();
        let input = RuleInput::new(&token.name, field, &args).numeric(numeric_field);

        let built = if let Some(factory) = self.registry.get(&token.name) {
            factory(&input)
        } else if let Some(factory) = rules::fallback(&token.name) {
            factory(&input)
        } else if self.config.strict {
            return Err(SpecError::UnknownRule {
                field: field.to_owned(),
                name: token.name.clone(),
            });
        } else {
            tracing::warn!(field, rule = %token.name, "unknown rule dropped");
            return Ok(None);
        };

        match built {
            Ok(predicate) => Ok(Some(predicate)),
            Err(err @ SpecError::InvalidPattern { .. }) => match self.config.invalid_pattern {
                PatternPolicy::Propagate => Err(err),
                PatternPolicy::Message => {
                    tracing::warn!(field, error = %err, "regex pattern does not compile");
                    Ok(Some(compare::unusable_pattern()))
                }
            },
            Err(err) if self.config.strict => Err(err),
            Err(err) => {
                tracing::warn!(field, rule = %token.name, error = %err, "rule dropped");
                Ok(None)
            }
        }
    }
}
