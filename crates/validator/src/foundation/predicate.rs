//! The executable form of a rule.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::value::Record;

/// A user-facing failure message.
///
/// Static messages (`"This field is required."`) borrow, interpolated ones
/// own their text.
pub type Message = Cow<'static, str>;

type CheckFn = dyn Fn(&Value, &Record) -> Option<Message> + Send + Sync;

/// A pure check over one field value and the record it belongs to.
///
/// `None` means the value passes; `Some(message)` is the failure shown to
/// the user. Predicates never mutate their inputs and are cheap to clone,
/// so a built field can be shared across threads.
///
/// # Examples
///
/// ```
/// use rulebook_validator::foundation::{Predicate, Record};
/// use serde_json::json;
///
/// let not_admin = Predicate::new(|value, _| {
///     (value == "admin").then(|| "Reserved name.".into())
/// });
/// assert!(not_admin.check(&json!("ada"), &Record::new()).is_none());
/// assert!(not_admin.check(&json!("admin"), &Record::new()).is_some());
/// ```
#[derive(Clone)]
pub struct Predicate {
    name: Cow<'static, str>,
    check: Arc<CheckFn>,
}

impl Predicate {
    /// Wraps an ad-hoc check. Its name is `"custom"`.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Value, &Record) -> Option<Message> + Send + Sync + 'static,
    {
        Self::named("custom", check)
    }

    /// Wraps a check under a rule name, used in logs.
    pub fn named<F>(name: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&Value, &Record) -> Option<Message> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// A predicate that accepts everything.
    pub fn pass(name: impl Into<Cow<'static, str>>) -> Self {
        Self::named(name, |_, _| None)
    }

    /// The rule name this predicate was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the check.
    #[inline]
    pub fn check(&self, value: &Value, record: &Record) -> Option<Message> {
        (self.check)(value, record)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish()
    }
}
