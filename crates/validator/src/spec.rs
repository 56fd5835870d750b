//! Field specifications and the ordered field-to-spec map.
//!
//! A field's rules arrive in one of three shapes: a rule string, a list of
//! rule strings, or a list mixing rule strings with literal predicates.
//! [`FieldSpec`] is the one type all of them normalize into.

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

use crate::catalog::RuleName;
use crate::foundation::Predicate;
use crate::parser::{RuleToken, parse_rule_string};
use crate::rules::temporal;

// ============================================================================
// FIELD SPEC
// ============================================================================

/// The rules declared for one field.
///
/// # Examples
///
/// ```
/// use rulebook_validator::{FieldSpec, Predicate, SpecItem};
///
/// let plain: FieldSpec = "required|email".into();
/// let listed: FieldSpec = vec!["required", "min:8"].into();
/// let mixed = FieldSpec::from(vec![
///     SpecItem::from("required"),
///     SpecItem::from(Predicate::new(|_, _| None)),
/// ]);
///
/// assert_eq!(plain.tokens().len(), 2);
/// assert_eq!(listed.tokens().len(), 2);
/// assert_eq!(mixed.tokens().len(), 1);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawSpec")]
pub enum FieldSpec {
    /// A single rule string such as `"required|min:8"`.
    Rules(String),
    /// Rule strings and literal predicates, evaluated in order.
    List(Vec<SpecItem>),
}

/// One element of a [`FieldSpec::List`].
#[derive(Debug, Clone)]
pub enum SpecItem {
    /// A rule string.
    Rules(String),
    /// A predicate used as-is.
    Predicate(Predicate),
}

impl FieldSpec {
    /// Parses every rule string in declaration order.
    ///
    /// Literal predicates contribute no tokens.
    pub fn tokens(&self) -> Vec<RuleToken> {
        match self {
            Self::Rules(expr) => parse_rule_string(expr),
            Self::List(items) => items
                .iter()
                .filter_map(|item| match item {
                    SpecItem::Rules(expr) => Some(parse_rule_string(expr)),
                    SpecItem::Predicate(_) => None,
                })
                .flatten()
                .collect(),
        }
    }

    /// Whether any rule string names `rule`.
    pub fn declares(&self, rule: RuleName) -> bool {
        self.tokens().iter().any(|token| token.name == rule.as_str())
    }

    /// Fields of the same record that this spec's rules read.
    ///
    /// `same:<f>`, `after:<f>` and `before:<f>` read `f`; a date literal
    /// passed to `after`/`before` reads nothing. `confirmed` on `field`
    /// reads `<field>_confirmation`.
    pub fn references(&self, field: &str) -> IndexSet<String> {
        let mut refs = IndexSet::new();
        for token in self.tokens() {
            match token.rule() {
                Some(RuleName::Same) => {
                    if let Some(other) = token.first_arg().filter(|a| !a.is_empty()) {
                        refs.insert(other.to_owned());
                    }
                }
                Some(RuleName::After | RuleName::Before) => {
                    if let Some(other) = token
                        .first_arg()
                        .filter(|a| !a.is_empty() && temporal::parse_date(a).is_none())
                    {
                        refs.insert(other.to_owned());
                    }
                }
                Some(RuleName::Confirmed) => {
                    refs.insert(format!("{field}_confirmation"));
                }
                _ => {}
            }
        }
        refs
    }
}

impl From<&str> for FieldSpec {
    fn from(expr: &str) -> Self {
        Self::Rules(expr.to_owned())
    }
}

impl From<String> for FieldSpec {
    fn from(expr: String) -> Self {
        Self::Rules(expr)
    }
}

impl From<Vec<&str>> for FieldSpec {
    fn from(exprs: Vec<&str>) -> Self {
        Self::List(exprs.into_iter().map(SpecItem::from).collect())
    }
}

impl From<Vec<String>> for FieldSpec {
    fn from(exprs: Vec<String>) -> Self {
        Self::List(exprs.into_iter().map(SpecItem::from).collect())
    }
}

impl From<Predicate> for FieldSpec {
    fn from(predicate: Predicate) -> Self {
        Self::List(vec![SpecItem::Predicate(predicate)])
    }
}

impl From<Vec<SpecItem>> for FieldSpec {
    fn from(items: Vec<SpecItem>) -> Self {
        Self::List(items)
    }
}

impl From<&str> for SpecItem {
    fn from(expr: &str) -> Self {
        Self::Rules(expr.to_owned())
    }
}

impl From<String> for SpecItem {
    fn from(expr: String) -> Self {
        Self::Rules(expr)
    }
}

impl From<Predicate> for SpecItem {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

/// The serialized shapes: a rule string or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpec {
    Rules(String),
    List(Vec<String>),
}

impl From<RawSpec> for FieldSpec {
    fn from(raw: RawSpec) -> Self {
        match raw {
            RawSpec::Rules(expr) => Self::Rules(expr),
            RawSpec::List(exprs) => exprs.into(),
        }
    }
}

// ============================================================================
// SPEC MAP
// ============================================================================

/// Field name to [`FieldSpec`], kept in declaration order.
///
/// Deserializes from a JSON or TOML table whose values are rule strings or
/// arrays of rule strings.
///
/// # Examples
///
/// ```
/// use rulebook_validator::SpecMap;
///
/// let specs: SpecMap = serde_json::from_str(
///     r#"{"password": "required|min:8", "password_confirmation": ["same:password"]}"#,
/// )
/// .unwrap();
///
/// let names: Vec<&str> = specs.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["password", "password_confirmation"]);
/// assert!(specs.dependents()["password"].contains("password_confirmation"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SpecMap(IndexMap<String, FieldSpec>);

impl SpecMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, consuming and returning the map.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.insert(name, spec);
        self
    }

    /// Adds or replaces a field. A replaced field keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Option<FieldSpec> {
        self.0.insert(name.into(), spec.into())
    }

    /// The spec for `name`.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.0.get(name)
    }

    /// Whether `name` has a spec.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Fields and specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.0.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// For each field read by some other field's rules, the fields that
    /// read it.
    ///
    /// After `password` changes, every field in `dependents()["password"]`
    /// should be evaluated again against the new record.
    pub fn dependents(&self) -> IndexMap<String, IndexSet<String>> {
        let mut map: IndexMap<String, IndexSet<String>> = IndexMap::new();
        for (field, spec) in self.iter() {
            for base in spec.references(field) {
                if base != field {
                    map.entry(base).or_default().insert(field.to_owned());
                }
            }
        }
        map
    }
}

impl<K, S> FromIterator<(K, S)> for SpecMap
where
    K: Into<String>,
    S: Into<FieldSpec>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, spec)| (name.into(), spec.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a SpecMap {
    type Item = (&'a String, &'a FieldSpec);
    type IntoIter = indexmap::map::Iter<'a, String, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokens_concatenate_rule_strings_in_order() {
        let spec = FieldSpec::from(vec![
            SpecItem::from("required"),
            SpecItem::from(Predicate::pass("custom")),
            SpecItem::from("min:3|max:9"),
        ]);
        let names: Vec<String> = spec.tokens().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["required", "min", "max"]);
    }

    #[test]
    fn declares_looks_through_lists() {
        let spec = FieldSpec::from(vec!["string", "nullable|max:5"]);
        assert!(spec.declares(RuleName::Nullable));
        assert!(!spec.declares(RuleName::Required));
    }

    #[test]
    fn deserializes_both_shapes() {
        let specs: SpecMap =
            serde_json::from_str(r#"{"a": "required", "b": ["nullable", "email"]}"#).unwrap();
        assert!(matches!(specs.get("a"), Some(FieldSpec::Rules(s)) if s == "required"));
        assert!(matches!(specs.get("b"), Some(FieldSpec::List(items)) if items.len() == 2));
    }

    #[test]
    fn deserializes_from_toml() {
        let specs: SpecMap = toml::from_str(
            r#"
            email = "required|email"
            age = ["numeric", "min:18"]
            "#,
        )
        .unwrap();
        let names: Vec<&str> = specs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["email", "age"]);
    }

    #[test]
    fn references_skip_date_literals() {
        let spec = FieldSpec::from("date|after:starts_on|before:2030-01-01");
        let refs: Vec<String> = spec.references("ends_on").into_iter().collect();
        assert_eq!(refs, ["starts_on"]);
    }

    #[test]
    fn dependents_invert_references() {
        let specs = SpecMap::new()
            .field("password", "required|confirmed")
            .field("password_confirmation", "same:password")
            .field("starts_on", "date")
            .field("ends_on", "date|after:starts_on");

        let deps = specs.dependents();
        let of = |base: &str| -> Vec<&str> {
            deps.get(base)
                .map(|set| set.iter().map(String::as_str).collect())
                .unwrap_or_default()
        };
        assert_eq!(of("password"), ["password_confirmation"]);
        assert_eq!(of("password_confirmation"), ["password"]);
        assert_eq!(of("starts_on"), ["ends_on"]);
        assert!(of("ends_on").is_empty());
    }

    #[test]
    fn insert_keeps_position() {
        let mut specs = SpecMap::new().field("a", "required").field("b", "email");
        assert!(specs.insert("a", "nullable").is_some());
        let names: Vec<&str> = specs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(specs.len(), 2);
    }

    #[test]
    fn collects_from_pairs() {
        let specs: SpecMap = [("name", "required"), ("bio", "nullable|max:200")]
            .into_iter()
            .collect();
        assert!(specs.contains("bio"));
        assert!(!specs.is_empty());
    }
}
