//! # rulebook-validator
//!
//! Declarative field validation driven by rule strings such as
//! `"required|min:8|in:admin,user"`.
//!
//! ## Quick Start
//!
//! ```rust
//! use rulebook_validator::prelude::*;
//! use serde_json::json;
//!
//! let specs = SpecMap::new()
//!     .field("email", "required|email")
//!     .field("password", "required|min:8")
//!     .field("password_confirmation", "same:password")
//!     .field("bio", "nullable|max:200");
//!
//! let record = json!({
//!     "email": "ada@example.com",
//!     "password": "correct horse",
//!     "password_confirmation": "correct horse",
//! });
//!
//! let verdict = evaluate_all(record.as_object().unwrap(), &specs)?;
//! assert!(verdict.is_valid());
//! # Ok::<(), SpecError>(())
//! ```
//!
//! ## Evaluation
//!
//! A field's rules run in declared order and the first failure is the
//! field's message. A field that declares `nullable` and holds an empty
//! value (`null`, blank text, an empty array) skips every rule, `required`
//! included.
//!
//! ## Built-in Rules
//!
//! - **Presence**: `required`, `nullable`
//! - **Format**: `email`, `string`, `numeric`, `integer`, `boolean`, `url`,
//!   `alpha`, `alpha_num`
//! - **Size**: `min`, `max`, `between`, `size`, `digits`, `digits_between`
//! - **Comparison**: `confirmed`, `same`, `in`, `not_in`, `starts_with`,
//!   `ends_with`, `regex`
//! - **Temporal**: `date`, `after`, `before`
//!
//! New rules are registry entries; see [`Registry::register`].
//!
//! ## Errors
//!
//! A failing field is a message, not an error. [`SpecError`] is reserved for
//! specifications that cannot be built: a `regex` pattern that does not
//! compile, and in strict mode unknown rule names and malformed arguments.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod foundation;
pub mod parser;
pub mod prelude;
pub mod registry;
pub mod remote;
pub mod rules;
pub mod spec;

pub use builder::{BuiltField, ValidatorBuilder};
pub use catalog::RuleName;
pub use config::{PatternPolicy, ValidatorConfig};
pub use engine::{RuleEngine, Verdict, evaluate_all, evaluate_field};
pub use foundation::{Message, Predicate, Record, SpecError, SpecResult};
pub use parser::{RuleToken, parse_rule_string};
pub use registry::{Registry, RuleFactory};
pub use remote::RemoteErrors;
pub use rules::{RuleArg, RuleInput};
pub use spec::{FieldSpec, SpecItem, SpecMap};
