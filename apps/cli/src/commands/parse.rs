use rulebook_validator::parse_rule_string;

use super::Outcome;

/// Prints the tokens as JSON. Unknown rule names are reported on stderr
/// but do not fail the command.
pub fn run(expr: &str) -> anyhow::Result<Outcome> {
    let tokens = parse_rule_string(expr);
    for token in &tokens {
        if token.rule().is_none() {
            tracing::warn!(rule = %token.name, "not a built-in rule");
        }
    }
    tracing::debug!(count = tokens.len(), "parsed");
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(Outcome::Valid)
}

