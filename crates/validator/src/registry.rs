//! Rule-name to factory dispatch.
//!
//! The registry is data, not a type hierarchy: each entry maps a rule name
//! to a factory that binds arguments into a [`Predicate`]. Adding a rule is
//! adding an entry; the evaluator never changes.
//!
//! # Examples
//!
//! ```
//! use rulebook_validator::{Predicate, Registry, RuleEngine, SpecMap};
//! use serde_json::json;
//!
//! let mut registry = Registry::builtin();
//! registry.register("uppercase", |_input| {
//!     Ok(Predicate::named("uppercase", |value, _| {
//!         let text = value.as_str().unwrap_or_default();
//!         (text.to_uppercase() != text).then(|| "Must be uppercase.".into())
//!     }))
//! });
//!
//! let engine = RuleEngine::new().with_registry(registry);
//! let specs = SpecMap::new().field("code", "required|uppercase");
//! let record = json!({"code": "abc"});
//! let verdict = engine.evaluate_all(record.as_object().unwrap(), &specs).unwrap();
//! assert_eq!(verdict.error("code"), Some("Must be uppercase."));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::catalog::RuleName;
use crate::foundation::{Predicate, SpecError};
use crate::rules::{self, RuleInput};

/// A factory turning one rule token's arguments into a predicate.
pub type RuleFactory = Arc<dyn Fn(&RuleInput<'_>) -> Result<Predicate, SpecError> + Send + Sync>;

/// A mapping from rule names to factories.
#[derive(Clone)]
pub struct Registry {
    factories: HashMap<String, RuleFactory>,
}

impl Registry {
    /// A registry with no rules. Only the `in` / `not_in` fallbacks resolve.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry holding the full built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for rule in RuleName::ALL {
            let factory = rules::factory(rule);
            registry.factories.insert(rule.as_str().to_owned(), Arc::new(factory));
        }
        registry
    }

    /// Adds a rule, replacing any existing entry under the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&RuleInput<'_>) -> Result<Predicate, SpecError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    /// Removes a rule. Returns whether it was present.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// The factory registered under `name`.
    pub fn get(&self, name: &str) -> Option<&RuleFactory> {
        self.factories.get(name)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.names())
            .finish()
    }
}
