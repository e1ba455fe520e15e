//! `vetted` validates a JSON document against a JSON schema.

mod args;

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing::debug;
use vetted::{Error, ValidationError, Value};

use crate::args::ValidationArgs;

#[derive(Parser, Debug)]
#[command(name = "vetted", version, about = "Validate JSON data against a schema")]
struct Cli {
    /// Path to the schema file
    schema: String,

    /// Path to the data file; reads stdin when omitted or `-`
    data: Option<String>,

    /// Print the validated data, with defaults and coerced values, as JSON
    #[arg(long)]
    print: bool,

    #[command(flatten)]
    validation: ValidationArgs,
}

enum Outcome {
    Valid(Value),
    Invalid(ValidationError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(Outcome::Valid(data)) => {
            if cli.print {
                match serde_json::to_string_pretty(&data) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Error: cannot print validated data: {e}");
                        return ExitCode::from(2);
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Invalid(errors)) => {
            eprintln!("{}: {errors}", display_path(cli.data.as_deref()));
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let schema = decode(&read_input(Some(&cli.schema))?, &cli.schema)?;
    let data_path = display_path(cli.data.as_deref());
    let data = decode(&read_input(cli.data.as_deref())?, data_path)?;

    let validator = cli.validation.to_validator();
    debug!(?validator, "validator configured");

    match validator.validate(data, &schema) {
        Ok(data) => Ok(Outcome::Valid(data)),
        Err(Error::Validation(errors)) => Ok(Outcome::Invalid(errors)),
        Err(Error::Schema(e)) => Err(anyhow!(e).context(format!("invalid schema {}", cli.schema))),
    }
}

/// Read input from a file path, or from stdin for `None` and `Some("-")`.
fn read_input(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading from stdin")?;
            Ok(buffer)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {path}")),
    }
}

fn decode(text: &str, origin: &str) -> anyhow::Result<Value> {
    vetted_value::json::from_json_str(text).with_context(|| format!("decoding {origin} as JSON"))
}

fn display_path(file: Option<&str>) -> &str {
    match file {
        None | Some("-") => "<stdin>",
        Some(path) => path,
    }
}
