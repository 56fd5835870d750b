//! Core validation types
//!
//! This module contains the fundamental building blocks every rule is made of:
//!
//! - **Predicates**: [`Predicate`], the pure `(value, record) -> message` check
//! - **Values**: [`Record`] plus the emptiness, number, and text coercions
//!   shared by every rule
//! - **Errors**: [`SpecError`], raised for broken rule specifications
//!
//! # Architecture
//!
//! ## 1. Dynamic values
//!
//! Field values are `serde_json::Value`s, so one rule can see a string, a
//! number, or an array and decide how to measure it:
//!
//! ```
//! use rulebook_validator::foundation::value;
//! use serde_json::json;
//!
//! assert_eq!(value::as_number(&json!("17")), Some(17.0));
//! assert_eq!(value::length(&json!([1, 2, 3])), Some(3));
//! assert!(value::is_empty(&json!("   ")));
//! ```
//!
//! ## 2. Validation failures are messages
//!
//! A failing predicate returns the user-facing text. There is no error code
//! or severity; one message per field is the whole contract:
//!
//! ```
//! use rulebook_validator::foundation::{Predicate, Record};
//! use serde_json::json;
//!
//! let even = Predicate::named("even", |value, _record| {
//!     match value.as_i64() {
//!         Some(n) if n % 2 == 0 => None,
//!         _ => Some("Must be even.".into()),
//!     }
//! });
//! assert!(even.check(&json!(4), &Record::new()).is_none());
//! assert_eq!(even.check(&json!(3), &Record::new()).as_deref(), Some("Must be even."));
//! ```
//!
//! ## 3. Configuration faults are errors
//!
//! A rule string that cannot be turned into predicates (a malformed regex,
//! a misspelled rule name in strict mode) surfaces as [`SpecError`] rather
//! than as a message attached to the field.

pub mod error;
pub mod predicate;
pub mod value;

pub use error::SpecError;
pub use predicate::{Message, Predicate};
pub use value::Record;

/// Result of building or evaluating a specification.
pub type SpecResult<T> = Result<T, SpecError>;
