mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::Outcome;
use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "rulebook", version, about = "Validate JSON records against rule strings")]
struct Cli {
    /// Config file (default: ./rulebook.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `rulebook_validator=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a record against a rule file
    Check {
        /// JSON object holding the record's fields
        #[arg(long, value_name = "FILE")]
        record: PathBuf,
        /// Field-to-rules map (.json or .toml)
        #[arg(long, value_name = "FILE")]
        rules: PathBuf,
        /// Evaluate only this field
        #[arg(long)]
        field: Option<String>,
        /// Response body with server-side messages to merge over the result
        #[arg(long, value_name = "FILE")]
        remote: Option<PathBuf>,
        /// Fail on unknown rules and malformed arguments
        #[arg(long)]
        strict: bool,
    },
    /// Print the tokens of a rule string
    Parse {
        /// Rule string, e.g. "required|min:8"
        expr: String,
    },
    /// List the built-in rules
    Rules,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(Outcome::Valid) => ExitCode::SUCCESS,
        Ok(Outcome::Invalid) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let strict = matches!(cli.command, Commands::Check { strict: true, .. });
    let config = CliConfig::load(cli.config.as_deref(), cli.log_level.as_deref(), strict)?;
    logging::init(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Check {
            record,
            rules,
            field,
            remote,
            strict: _,
        } => commands::check::run(
            &config,
            &commands::check::Inputs {
                record: &record,
                rules: &rules,
                field: field.as_deref(),
                remote: remote.as_deref(),
            },
        ),
        Commands::Parse { expr } => commands::parse::run(&expr),
        Commands::Rules => commands::rules::run(),
    }
}
