//! Presence rules: `required` and `nullable`.

use crate::foundation::{Predicate, SpecError, value};
use crate::rules::RuleInput;

/// `required`: fails on empty values.
pub fn required(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::named("required", |v, _| {
        value::is_empty(v).then_some("This field is required.".into())
    }))
}

/// `nullable`: never fails on its own.
///
/// Its effect lives in the field evaluator, which skips every rule of a
/// nullable field whose value is empty.
pub fn nullable(_input: &RuleInput<'_>) -> Result<Predicate, SpecError> {
    Ok(Predicate::pass("nullable"))
}

#[cfg(test)]
mod tests {
    use super::super::testing::{build, check};
    use crate::catalog::RuleName;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(json!(null))]
    #[case(json!(""))]
    #[case(json!("   "))]
    #[case(json!([]))]
    fn required_rejects_empty(#[case] value: Value) {
        let p = build(RuleName::Required, &[]);
        assert_eq!(check(&p, value).as_deref(), Some("This field is required."));
    }

    #[rstest]
    #[case(json!("x"))]
    #[case(json!(0))]
    #[case(json!(false))]
    #[case(json!([null]))]
    #[case(json!({}))]
    fn required_accepts_present(#[case] value: Value) {
        let p = build(RuleName::Required, &[]);
        assert_eq!(check(&p, value), None);
    }

    #[test]
    fn nullable_never_fails() {
        let p = build(RuleName::Nullable, &[]);
        assert_eq!(check(&p, json!(null)), None);
        assert_eq!(check(&p, json!("anything")), None);
    }
}
