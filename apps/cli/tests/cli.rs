//! End-to-end tests for the `rulebook` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rulebook() -> Command {
    let mut cmd = Command::cargo_bin("rulebook").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("RULEBOOK_STRICT")
        .env_remove("RULEBOOK_LOG_LEVEL")
        .env_remove("RULEBOOK_INVALID_PATTERN");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn valid_record_exits_zero() {
    let dir = TempDir::new().unwrap();
    let record = write(&dir, "record.json", r#"{"email": "ada@example.com", "age": "36"}"#);
    let rules = write(&dir, "rules.json", r#"{"email": "required|email", "age": "numeric|min:18"}"#);

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--record"])
        .arg(&record)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""valid": true"#));
}

#[test]
fn invalid_record_exits_one_with_messages() {
    let dir = TempDir::new().unwrap();
    let record = write(&dir, "record.json", r#"{"name": "", "age": "17"}"#);
    let rules = write(
        &dir,
        "rules.toml",
        "name = \"required\"\nage = [\"numeric\", \"min:18\"]\n",
    );

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--record"])
        .arg(&record)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("This field is required."))
        .stdout(predicate::str::contains("Must be at least 18."));
}

#[test]
fn single_field_check() {
    let dir = TempDir::new().unwrap();
    let record = write(&dir, "record.json", r#"{"role": "guest"}"#);
    let rules = write(&dir, "rules.json", r#"{"role": "in:admin,user"}"#);

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--field", "role", "--record"])
        .arg(&record)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Value must be one of: admin, user."));
}

#[test]
fn remote_messages_are_merged() {
    let dir = TempDir::new().unwrap();
    let record = write(&dir, "record.json", r#"{"email": "ada@example.com"}"#);
    let rules = write(&dir, "rules.json", r#"{"email": "required|email"}"#);
    let remote = write(
        &dir,
        "response.json",
        r#"{"message": "Invalid", "errors": {"email": ["Already taken.", "Blocked."]}}"#,
    );

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--record"])
        .arg(&record)
        .arg("--rules")
        .arg(&rules)
        .arg("--remote")
        .arg(&remote)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Already taken."))
        .stdout(predicate::str::contains("Blocked.").not());
}

#[test]
fn strict_flag_turns_typos_into_errors() {
    let dir = TempDir::new().unwrap();
    let record = write(&dir, "record.json", r#"{"email": "ada@example.com"}"#);
    let rules = write(&dir, "rules.json", r#"{"email": "required|emial"}"#);

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--record"])
        .arg(&record)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success();

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--strict", "--record"])
        .arg(&record)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown rule `emial`"));
}

#[test]
fn config_file_sets_strict_mode() {
    let dir = TempDir::new().unwrap();
    let record = write(&dir, "record.json", r#"{"email": "ada@example.com"}"#);
    let rules = write(&dir, "rules.json", r#"{"email": "required|emial"}"#);
    write(&dir, "rulebook.toml", "strict = true\n");

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--record"])
        .arg(&record)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .code(2);
}

#[test]
fn env_overrides_pattern_policy() {
    let dir = TempDir::new().unwrap();
    let record = write(&dir, "record.json", r#"{"zip": "12345"}"#);
    let rules = write(&dir, "rules.json", r#"{"zip": "regex:([0-9]"}"#);

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--record"])
        .arg(&record)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid regex pattern"));

    rulebook()
        .current_dir(dir.path())
        .env("RULEBOOK_INVALID_PATTERN", "message")
        .args(["check", "--record"])
        .arg(&record)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid format."));
}

#[test]
fn unreadable_inputs_exit_two() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", r#"{"a": "required"}"#);
    let not_object = write(&dir, "record.json", "[1, 2]");

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--record", "missing.json", "--rules"])
        .arg(&rules)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read"));

    rulebook()
        .current_dir(dir.path())
        .args(["check", "--record"])
        .arg(&not_object)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must hold a JSON object"));
}

#[test]
fn parse_prints_tokens() {
    rulebook()
        .args(["parse", "required|min:8|in:admin, user"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "min""#))
        .stdout(predicate::str::contains(r#""admin""#))
        .stdout(predicate::str::contains(r#""user""#));
}

#[test]
fn rules_lists_the_catalog() {
    rulebook()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("required\nnullable\n"))
        .stdout(predicate::str::contains("digits_between"));
}
