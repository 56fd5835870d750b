use rulebook_validator::RuleName;

use super::Outcome;

/// Prints one built-in rule name per line, in catalog order.
pub fn run() -> anyhow::Result<Outcome> {
    for rule in RuleName::ALL {
        println!("{rule}");
    }
    Ok(Outcome::Valid)
}
