//! Layered configuration: defaults → config file → `RULEBOOK_*` env → flags.

use std::path::Path;

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rulebook_validator::{PatternPolicy, ValidatorConfig};
use serde::{Deserialize, Serialize};

const DEFAULT_FILE: &str = "rulebook.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub strict: bool,
    pub invalid_pattern: PatternPolicy,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            strict: false,
            invalid_pattern: PatternPolicy::default(),
        }
    }
}

impl CliConfig {
    /// Merges every layer. An explicit `--config` path must exist; the
    /// default `rulebook.toml` is optional.
    pub fn load(file: Option<&Path>, log_level: Option<&str>, strict: bool) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        figment = match file {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file {} not found", path.display());
                }
                figment.merge(Toml::file(path))
            }
            None => figment.merge(Toml::file(DEFAULT_FILE)),
        };
        figment = figment.merge(Env::prefixed("RULEBOOK_"));

        if let Some(level) = log_level {
            figment = figment.merge(("log_level", level));
        }
        if strict {
            figment = figment.merge(("strict", true));
        }

        figment.extract().context("invalid configuration")
    }

    pub fn validator(&self) -> ValidatorConfig {
        ValidatorConfig::default()
            .with_strict(self.strict)
            .with_invalid_pattern(self.invalid_pattern)
    }
}
