//! Messages reported by a remote peer, merged over local results.
//!
//! Peers answer in the same one-message-per-field shape the engine uses.
//! When a peer sends several messages for a field, only the first is kept.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::Verdict;
use crate::foundation::{Message, value};

/// Field name to the first message a peer reported for it.
///
/// # Examples
///
/// ```
/// use rulebook_validator::{RemoteErrors, SpecMap, evaluate_all};
/// use serde_json::json;
///
/// let specs = SpecMap::new().field("email", "required|email");
/// let record = json!({"email": "ada@example.com"});
/// let mut verdict = evaluate_all(record.as_object().unwrap(), &specs).unwrap();
/// assert!(verdict.is_valid());
///
/// let body = json!({"message": "Unprocessable", "errors": {"email": ["Already taken.", "Blocked."]}});
/// verdict.overlay(&RemoteErrors::from_envelope(&body));
///
/// assert!(!verdict.is_valid());
/// assert_eq!(verdict.error("email"), Some("Already taken."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteErrors(IndexMap<String, Option<Message>>);

impl RemoteErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `{field: message | [message, ...] | null}`.
    ///
    /// Arrays keep their first element; an empty array and `null` mean no
    /// message. Anything that is not an object yields no entries.
    pub fn from_json(errors: &Value) -> Self {
        let Some(object) = errors.as_object() else {
            return Self::default();
        };
        object
            .iter()
            .map(|(field, raw)| (field.clone(), first_message(raw)))
            .collect()
    }

    /// Reads the `errors` member of a response body such as
    /// `{"message": "...", "errors": {...}}`.
    pub fn from_envelope(body: &Value) -> Self {
        body.get("errors").map_or_else(Self::default, Self::from_json)
    }

    /// Sets the message for `field`.
    pub fn insert(&mut self, field: impl Into<String>, message: Option<Message>) {
        self.0.insert(field.into(), message);
    }

    /// The message for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Option::as_deref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<Message>)> for RemoteErrors {
    fn from_iter<I: IntoIterator<Item = (String, Option<Message>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn first_message(raw: &Value) -> Option<Message> {
    let raw = match raw {
        Value::Array(items) => items.first()?,
        other => other,
    };
    match raw {
        Value::Null => None,
        Value::String(text) => Some(text.clone().into()),
        other => Some(value::to_text(other).into_owned().into()),
    }
}

impl Verdict {
    /// Merges remote messages over this verdict.
    ///
    /// A remote message replaces the local result for its field; fields the
    /// local specs did not cover are appended. Remote `null` entries leave
    /// local results alone. `valid` is recomputed afterwards.
    pub fn overlay(&mut self, remote: &RemoteErrors) {
        for (field, message) in &remote.0 {
            if let Some(message) = message {
                self.errors.insert(field.clone(), Some(message.clone()));
            }
        }
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn keeps_the_first_message_per_field() {
        let remote = RemoteErrors::from_json(&json!({
            "email": ["Already taken.", "Blocked."],
            "name": "Too common.",
            "age": null,
            "tags": [],
        }));
        assert_eq!(remote.len(), 4);
        assert_eq!(remote.get("email"), Some("Already taken."));
        assert_eq!(remote.get("name"), Some("Too common."));
        assert_eq!(remote.get("age"), None);
        assert_eq!(remote.get("tags"), None);
    }

    #[test]
    fn non_objects_yield_nothing() {
        assert!(RemoteErrors::from_json(&json!(["email"])).is_empty());
        assert!(RemoteErrors::from_envelope(&json!({"message": "Server Error"})).is_empty());
    }

    #[test]
    fn overlay_replaces_appends_and_recomputes() {
        let mut verdict = Verdict::from_results(IndexMap::from([
            ("name".to_owned(), Some(Message::Borrowed("This field is required."))),
            ("email".to_owned(), None),
        ]));

        let mut remote = RemoteErrors::new();
        remote.insert("name", None);
        remote.insert("email", Some("Already taken.".into()));
        remote.insert("captcha", Some("Try again.".into()));
        verdict.overlay(&remote);

        assert!(!verdict.is_valid());
        assert_eq!(verdict.error("name"), Some("This field is required."));
        assert_eq!(verdict.error("email"), Some("Already taken."));
        let keys: Vec<&String> = verdict.errors().keys().collect();
        assert_eq!(keys, ["name", "email", "captcha"]);
    }

    #[test]
    fn overlay_of_nothing_keeps_validity() {
        let mut verdict = Verdict::from_results(IndexMap::from([("a".to_owned(), None)]));
        verdict.overlay(&RemoteErrors::from_json(&json!({"a": null})));
        assert!(verdict.is_valid());
    }

    #[test]
    fn round_trips_through_serde() {
        let remote: RemoteErrors = serde_json::from_str(r#"{"email": "Taken."}"#).unwrap();
        assert_eq!(remote.get("email"), Some("Taken."));
        assert_eq!(
            serde_json::to_value(&remote).unwrap(),
            json!({"email": "Taken."})
        );
    }
}
