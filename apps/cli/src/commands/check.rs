use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use rulebook_validator::foundation::value;
use rulebook_validator::{Record, RemoteErrors, RuleEngine, SpecMap};
use serde_json::{Value, json};

use super::Outcome;
use crate::config::CliConfig;

pub struct Inputs<'a> {
    pub record: &'a Path,
    pub rules: &'a Path,
    pub field: Option<&'a str>,
    pub remote: Option<&'a Path>,
}

pub fn run(config: &CliConfig, inputs: &Inputs<'_>) -> anyhow::Result<Outcome> {
    let record = load_record(inputs.record)?;
    let specs = load_specs(inputs.rules)?;
    let engine = RuleEngine::new().with_config(config.validator());
    tracing::info!(fields = specs.len(), "evaluating record");

    if let Some(field) = inputs.field {
        let spec = specs.get(field);
        if spec.is_none() {
            tracing::warn!(field, "no rules for field");
        }
        let value = value::field(&record, field);
        let mut message = engine
            .evaluate_field(field, value, &record, spec)
            .with_context(|| format!("cannot build rules for `{field}`"))?;
        let remote = inputs.remote.map(load_remote).transpose()?;
        if let Some(remote_message) = remote.as_ref().and_then(|r| r.get(field)) {
            message = Some(remote_message.to_owned().into());
        }

        println!(
            "{}",
            serde_json::to_string_pretty(&json!({"field": field, "message": message}))?
        );
        return Ok(Outcome::from_valid(message.is_none()));
    }

    let mut verdict = engine
        .evaluate_all(&record, &specs)
        .context("cannot build rules")?;
    if let Some(path) = inputs.remote {
        verdict.overlay(&load_remote(path)?);
    }

    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(Outcome::from_valid(verdict.is_valid()))
}

fn load_record(path: &Path) -> anyhow::Result<Record> {
    let text = read(path)?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match value {
        Value::Object(record) => Ok(record),
        other => bail!(
            "{} must hold a JSON object, found {}",
            path.display(),
            kind(&other)
        ),
    }
}

fn load_specs(path: &Path) -> anyhow::Result<SpecMap> {
    let text = read(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str(&text).with_context(|| format!("{} is not a valid rule table", path.display()))
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("{} is not a valid rule map", path.display()))
    }
}

/// Accepts a full response body (`{"errors": {...}}`) or a bare error map.
fn load_remote(path: &Path) -> anyhow::Result<RemoteErrors> {
    let text = read(path)?;
    let body: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(if body.get("errors").is_some() {
        RemoteErrors::from_envelope(&body)
    } else {
        RemoteErrors::from_json(&body)
    })
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
