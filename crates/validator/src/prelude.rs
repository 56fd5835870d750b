//! Prelude module for convenient imports.
//!
//! Provides a single `use rulebook_validator::prelude::*;` import that brings
//! in the entry points and the types needed to declare rules.
//!
//! # Examples
//!
//! ```rust
//! use rulebook_validator::prelude::*;
//! use serde_json::json;
//!
//! let spec = FieldSpec::from("in:admin,user");
//! let message = evaluate_field("role", &json!("guest"), &Record::new(), Some(&spec))?;
//! assert_eq!(message.as_deref(), Some("Value must be one of: admin, user."));
//! # Ok::<(), SpecError>(())
//! ```

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub use crate::engine::{RuleEngine, Verdict, evaluate_all, evaluate_field};

// ============================================================================
// SPECIFICATIONS
// ============================================================================

pub use crate::config::{PatternPolicy, ValidatorConfig};
pub use crate::spec::{FieldSpec, SpecItem, SpecMap};

// ============================================================================
// EXTENDING
// ============================================================================

pub use crate::foundation::{Message, Predicate, Record, SpecError};
pub use crate::registry::Registry;
pub use crate::remote::RemoteErrors;
pub use crate::rules::{RuleArg, RuleInput};
