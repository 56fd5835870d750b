//! Field and record evaluation.
//!
//! [`RuleEngine`] pairs a [`Registry`] with a [`ValidatorConfig`]. It holds
//! no per-call state, so one engine can serve any number of threads. The
//! free functions [`evaluate_field`] and [`evaluate_all`] use a shared
//! engine with the built-in catalog and the default configuration.

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::{BuiltField, ValidatorBuilder};
use crate::config::ValidatorConfig;
use crate::foundation::{Message, Record, SpecResult, value};
use crate::registry::Registry;
use crate::spec::{FieldSpec, SpecMap};

static DEFAULT_ENGINE: LazyLock<RuleEngine> = LazyLock::new(RuleEngine::new);

// ============================================================================
// VERDICT
// ============================================================================

/// The outcome of evaluating a record.
///
/// `errors` holds one entry per specified field, in spec order: the field's
/// message, or `None` when it passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub(crate) valid: bool,
    pub(crate) errors: IndexMap<String, Option<Message>>,
}

impl Verdict {
    /// Builds a verdict from per-field results.
    pub fn from_results(errors: IndexMap<String, Option<Message>>) -> Self {
        let valid = errors.values().all(Option::is_none);
        Self { valid, errors }
    }

    /// Whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The message for `field`, if it failed.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).and_then(Option::as_deref)
    }

    /// Every specified field and its result.
    pub fn errors(&self) -> &IndexMap<String, Option<Message>> {
        &self.errors
    }

    /// Failing fields and their messages.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .filter_map(|(field, message)| Some((field.as_str(), message.as_deref()?)))
    }

    /// Consumes the verdict, returning the per-field results.
    pub fn into_errors(self) -> IndexMap<String, Option<Message>> {
        self.errors
    }

    pub(crate) fn recompute(&mut self) {
        self.valid = self.errors.values().all(Option::is_none);
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Evaluates fields and records against rule specifications.
///
/// # Examples
///
/// ```
/// use rulebook_validator::{RuleEngine, SpecMap, ValidatorConfig};
/// use serde_json::json;
///
/// let engine = RuleEngine::new().with_config(ValidatorConfig::default().with_strict(true));
/// let specs = SpecMap::new()
///     .field("name", "required")
///     .field("age", "numeric|min:18");
///
/// let record = json!({"name": "", "age": "17"});
/// let verdict = engine.evaluate_all(record.as_object().unwrap(), &specs)?;
///
/// assert!(!verdict.is_valid());
/// assert_eq!(verdict.error("name"), Some("This field is required."));
/// assert_eq!(verdict.error("age"), Some("Must be at least 18."));
/// # Ok::<(), rulebook_validator::SpecError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    registry: Registry,
    config: ValidatorConfig,
}

impl RuleEngine {
    /// An engine with the built-in catalog and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the registry.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Builds the predicates of one field without running them.
    pub fn build(&self, field: &str, spec: &FieldSpec) -> SpecResult<BuiltField> {
        ValidatorBuilder::new(&self.registry, &self.config).build(field, spec)
    }

    /// Evaluates one field.
    ///
    /// Returns `Ok(None)` when `spec` is absent, when the field is nullable
    /// and `value` is empty, or when every rule passes. Otherwise returns
    /// the message of the first failing rule.
    ///
    /// # Errors
    ///
    /// Any [`SpecError`](crate::SpecError) raised while building the field's
    /// predicates.
    pub fn evaluate_field(
        &self,
        field: &str,
        value: &Value,
        record: &Record,
        spec: Option<&FieldSpec>,
    ) -> SpecResult<Option<Message>> {
        let Some(spec) = spec else {
            return Ok(None);
        };
        let built = self.build(field, spec)?;

        if built.skips(value) {
            tracing::debug!(field, "empty nullable field, rules skipped");
            return Ok(None);
        }

        Ok(built
            .first_failure(value, record)
            .map(|(predicate, message)| {
                tracing::trace!(field, rule = predicate.name(), %message, "field failed");
                message
            }))
    }

    /// Evaluates every field of `specs` against `record`.
    ///
    /// Fields missing from `record` are evaluated as `null`; fields of
    /// `record` without a spec are ignored.
    ///
    /// # Errors
    ///
    /// The first [`SpecError`](crate::SpecError) raised while building any
    /// field's predicates.
    pub fn evaluate_all(&self, record: &Record, specs: &SpecMap) -> SpecResult<Verdict> {
        let mut errors = IndexMap::with_capacity(specs.len());
        for (field, spec) in specs.iter() {
            let message =
                self.evaluate_field(field, value::field(record, field), record, Some(spec))?;
            errors.insert(field.to_owned(), message);
        }
        let verdict = Verdict::from_results(errors);
        tracing::debug!(
            fields = specs.len(),
            valid = verdict.is_valid(),
            "record evaluated"
        );
        Ok(verdict)
    }

    /// Evaluates `field` and every field whose rules read it.
    ///
    /// Returns entries only for the evaluated fields that have a spec, with
    /// `field` first. Use after `field` changed in `record`.
    ///
    /// # Errors
    ///
    /// As for [`RuleEngine::evaluate_all`].
    pub fn revalidate(
        &self,
        field: &str,
        record: &Record,
        specs: &SpecMap,
    ) -> SpecResult<IndexMap<String, Option<Message>>> {
        let dependents = specs.dependents();
        let affected = std::iter::once(field)
            .chain(dependents.get(field).into_iter().flatten().map(String::as_str));

        let mut results = IndexMap::new();
        for name in affected {
            let Some(spec) = specs.get(name) else {
                continue;
            };
            let message = self.evaluate_field(name, value::field(record, name), record, Some(spec))?;
            results.insert(name.to_owned(), message);
        }
        Ok(results)
    }
}

/// [`RuleEngine::evaluate_field`] on the default engine.
///
/// # Errors
///
/// [`SpecError::InvalidPattern`](crate::SpecError::InvalidPattern) when a
/// `regex` rule's pattern does not compile.
pub fn evaluate_field(
    field: &str,
    value: &Value,
    record: &Record,
    spec: Option<&FieldSpec>,
) -> SpecResult<Option<Message>> {
    DEFAULT_ENGINE.evaluate_field(field, value, record, spec)
}

/// [`RuleEngine::evaluate_all`] on the default engine.
///
/// # Errors
///
/// [`SpecError::InvalidPattern`](crate::SpecError::InvalidPattern) when a
/// `regex` rule's pattern does not compile.
pub fn evaluate_all(record: &Record, specs: &SpecMap) -> SpecResult<Verdict> {
    DEFAULT_ENGINE.evaluate_all(record, specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Predicate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn absent_spec_is_valid() {
        let result = evaluate_field("x", &json!("anything"), &Record::new(), None).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn first_failure_wins() {
        let spec = FieldSpec::from("email|min:50");
        let result = evaluate_field("e", &json!("nope"), &Record::new(), Some(&spec)).unwrap();
        assert_eq!(result.as_deref(), Some("Invalid email address."));
    }

    #[test]
    fn verdict_has_one_entry_per_spec_field() {
        let specs = SpecMap::new().field("a", "required").field("b", "nullable|email");
        let verdict = evaluate_all(&record(json!({"a": "x", "extra": 1})), &specs).unwrap();
        assert!(verdict.is_valid());
        let keys: Vec<&String> = verdict.errors().keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(verdict.failures().count(), 0);
    }

    #[test]
    fn verdict_serializes_in_spec_order() {
        let specs = SpecMap::new().field("name", "required").field("age", "numeric");
        let verdict = evaluate_all(&record(json!({"age": 3})), &specs).unwrap();
        assert_eq!(
            serde_json::to_value(&verdict).unwrap(),
            json!({"valid": false, "errors": {"name": "This field is required.", "age": null}})
        );
    }

    #[test]
    fn revalidate_covers_dependents() {
        let specs = SpecMap::new()
            .field("password", "required|min:8")
            .field("password_confirmation", "same:password")
            .field("email", "required|email");
        let data = record(json!({"password": "longenough", "password_confirmation": "short"}));

        let results = DEFAULT_ENGINE.revalidate("password", &data, &specs).unwrap();
        let keys: Vec<&String> = results.keys().collect();
        assert_eq!(keys, ["password", "password_confirmation"]);
        assert_eq!(results["password"], None);
        assert_eq!(results["password_confirmation"].as_deref(), Some("Fields do not match."));
    }

    #[test]
    fn revalidate_skips_unspecified_fields() {
        let specs = SpecMap::new().field("b", "same:a");
        let results = RuleEngine::new()
            .revalidate("a", &record(json!({"a": 1, "b": 1})), &specs)
            .unwrap();
        let keys: Vec<&String> = results.keys().collect();
        assert_eq!(keys, ["b"]);
    }

    #[test]
    fn custom_registry_entries_run_like_builtins() {
        let mut engine = RuleEngine::new();
        engine.registry_mut().register("even", |_| {
            Ok(Predicate::named("even", |v, _| {
                (v.as_i64().is_some_and(|n| n % 2 != 0)).then_some("Must be even.".into())
            }))
        });
        let spec = FieldSpec::from("integer|even");
        let result = engine
            .evaluate_field("n", &json!(3), &Record::new(), Some(&spec))
            .unwrap();
        assert_eq!(result.as_deref(), Some("Must be even."));
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleEngine>();
        assert_send_sync::<Verdict>();
    }
}
