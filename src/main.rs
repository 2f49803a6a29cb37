//! Unformat CLI
//!
//! Usage:
//!   unformat parse <TEMPLATE> [--json]
//!   unformat match <TEMPLATE> <CANDIDATE> [--config <FILE>]
//!   unformat format <TEMPLATE> [-v NAME=VALUE]...

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use unformat::{MatchOptions, Part, Template, Value};

#[derive(Parser)]
#[command(name = "unformat")]
#[command(about = "Parse, match and render placeholder templates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the parts a template is made of
    Parse {
        template: String,

        /// Print the template as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract parameter values from a string (exit code 1 when it does not match)
    Match {
        template: String,

        candidate: String,

        /// Match options file (TOML format)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Render a template with NAME=VALUE bindings
    Format {
        template: String,

        /// Parameter value, repeatable; read as a number only where the
        /// parameter carries a format spec, otherwise printed verbatim
        #[arg(short = 'v', long = "value", value_name = "NAME=VALUE")]
        values: Vec<String>,
    },
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Parse { template, json } => {
            let template = parse_or_report(&template)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&template)?);
            } else {
                for part in template.parts() {
                    println!("{}", part);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match {
            template,
            candidate,
            config,
        } => {
            let options = match &config {
                Some(path) => MatchOptions::from_file(path)
                    .with_context(|| format!("loading match options '{}'", path.display()))?,
                None => MatchOptions::default(),
            };

            let template = parse_or_report(&template)?;
            match template.unformat_with(&candidate, &options) {
                Some(bindings) => {
                    println!("{}", serde_json::to_string_pretty(&bindings)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("'{}' does not match '{}'", candidate, template);
                    Ok(ExitCode::from(1))
                }
            }
        }
        Commands::Format { template, values } => {
            let template = parse_or_report(&template)?;
            let values = parse_values(&template, &values)?;
            println!("{}", template.format(&values)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Parse a template, printing a source diagnostic on failure
fn parse_or_report(source: &str) -> Result<Template> {
    Template::parse(source).map_err(|e| {
        eprint!("{}", e.report(source, "template"));
        anyhow!(e)
    })
}

fn parse_values(template: &Template, pairs: &[String]) -> Result<HashMap<String, Value>> {
    let with_spec: HashSet<&str> = template
        .parts()
        .iter()
        .filter_map(|part| match part {
            Part::Parameter(p) if p.format_spec().is_some() => Some(p.name()),
            _ => None,
        })
        .collect();

    pairs
        .iter()
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("expected NAME=VALUE, got '{}'", pair))?;
            let value = if with_spec.contains(name) {
                Value::infer(value)
            } else {
                Value::from(value)
            };
            Ok((name.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(template: &str, pairs: &[&str]) -> String {
        let template = Template::parse(template).unwrap();
        let pairs: Vec<String> = pairs.iter().map(|p| p.to_string()).collect();
        let values = parse_values(&template, &pairs).unwrap();
        template.format(&values).unwrap()
    }

    #[test]
    fn test_plain_values_print_verbatim() {
        assert_eq!(format("a/{Id}/{Exp}", &["Id=007", "Exp=1e3"]), "a/007/1e3");
    }

    #[test]
    fn test_values_with_spec_are_numbers() {
        assert_eq!(format("a/{Id:D5}/{Hex:X}", &["Id=007", "Hex=255"]), "a/00007/FF");
    }

    #[test]
    fn test_value_without_equals_is_error() {
        let template = Template::parse("a/{Id}").unwrap();
        assert!(parse_values(&template, &["Id".to_string()]).is_err());
    }
}
