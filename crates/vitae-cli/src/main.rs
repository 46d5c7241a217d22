mod logging;
mod settings;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use logging::{LoggingError, init_logging};
use settings::{Settings, SettingsError, load_settings};
use thiserror::Error;
use uuid::Uuid;
use vitae_document::{
    DocumentError, OutputFormats, ValidationIssue, cv_json_schema_value, load_document,
    load_document_value, load_schema, read_document, save_document, write_bytes_atomic,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path} is invalid: {errors} schema error(s)")]
    InvalidDocument { path: String, errors: usize },
    #[error("no value at field path '{0}'")]
    FieldNotFound(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "vitae", version, about = "Validate, normalize and query résumé documents")]
struct Cli {
    /// Settings file (defaults to ./vitae.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log filter, e.g. `info` or `vitae_document=debug`.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a document against the schema and report every issue.
    Validate(ValidateArgs),
    /// Load a document and write it back in canonical form.
    Normalize(NormalizeArgs),
    /// Print a single value from a document.
    Get(GetArgs),
    /// Print or write the generated JSON Schema.
    Schema(SchemaArgs),
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Résumé document (.json, .yaml or .yml).
    #[arg(long, value_name = "PATH")]
    cv_file: PathBuf,
    /// JSON Schema to validate against instead of the generated one.
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    #[arg(long, value_name = "PATH")]
    cv_file: PathBuf,
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,
    /// Output directory (overrides `output.dir`).
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// Output file name without extension.
    #[arg(long, value_name = "STEM")]
    filename: Option<String>,
    #[arg(long, default_value_t = false)]
    no_json: bool,
    #[arg(long, default_value_t = false)]
    no_yaml: bool,
}

#[derive(Args, Debug)]
struct GetArgs {
    #[arg(long, value_name = "PATH")]
    cv_file: PathBuf,
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,
    /// Field names from the root, e.g. `basic name`.
    #[arg(value_name = "FIELD", required = true)]
    field: Vec<String>,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Write the schema here instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| settings.logging.level.clone());
    init_logging(&level, settings.logging.file.as_deref())?;

    match cli.command {
        Command::Validate(args) => run_validate(args, &settings),
        Command::Normalize(args) => run_normalize(args, &settings),
        Command::Get(args) => run_get(args, &settings),
        Command::Schema(args) => run_schema(args),
    }
}

fn run_validate(args: ValidateArgs, settings: &Settings) -> Result<(), CliError> {
    let schema = resolve_schema(args.schema.as_deref(), settings)?;
    let raw = read_document(&args.cv_file)?;

    match load_document_value(&raw, &schema) {
        Ok(loaded) => {
            print_issues(&loaded.warnings);
            println!("{}: ok ({} warning(s))", args.cv_file.display(), loaded.warnings.len());
            Ok(())
        }
        Err(DocumentError::SchemaValidation(report)) => {
            let issues: Vec<ValidationIssue> = report.issues().cloned().collect();
            print_issues(&issues);
            Err(CliError::InvalidDocument {
                path: args.cv_file.display().to_string(),
                errors: report.errors.len(),
            })
        }
        Err(err) => Err(err.into()),
    }
}

fn run_normalize(args: NormalizeArgs, settings: &Settings) -> Result<(), CliError> {
    let formats = OutputFormats {
        json: settings.output.json && !args.no_json,
        yaml: settings.output.yaml && !args.no_yaml,
    };
    if !formats.json && !formats.yaml {
        return Err(CliError::InvalidConfig(
            "no output format selected".to_string(),
        ));
    }

    let schema = resolve_schema(args.schema.as_deref(), settings)?;
    let loaded = load_document(&args.cv_file, &schema)?;
    for warning in &loaded.warnings {
        eprintln!("{warning}");
    }

    let dir = args.out_dir.unwrap_or_else(|| settings.output.dir.clone());
    let stem = args.filename.unwrap_or_else(default_stem);
    let written = save_document(&loaded.model, &dir.join(stem), formats)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_get(args: GetArgs, settings: &Settings) -> Result<(), CliError> {
    let schema = resolve_schema(args.schema.as_deref(), settings)?;
    let loaded = load_document(&args.cv_file, &schema)?;

    let path: Vec<&str> = args.field.iter().map(String::as_str).collect();
    match loaded.model.get(&path) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(CliError::FieldNotFound(path.join("."))),
    }
}

fn run_schema(args: SchemaArgs) -> Result<(), CliError> {
    let schema = cv_json_schema_value()?;
    let mut rendered = serde_json::to_string_pretty(&schema)?;
    rendered.push('\n');

    match args.out {
        Some(path) => {
            write_bytes_atomic(&path, rendered.as_bytes())?;
            tracing::info!(event = "schema_written", path = %path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn resolve_schema(
    explicit: Option<&Path>,
    settings: &Settings,
) -> Result<serde_json::Value, CliError> {
    let path = explicit.or(settings.schema.path.as_deref());
    Ok(load_schema(path)?)
}

fn print_issues(issues: &[ValidationIssue]) {
    for issue in issues {
        println!("{issue}");
    }
}

/// `cv-<first uuid group>` for normalize runs without `--filename`.
fn default_stem() -> String {
    let id = Uuid::new_v4().to_string();
    match id.split('-').next() {
        Some(part) if !part.is_empty() => format!("cv-{part}"),
        _ => format!("cv-{id}"),
    }
}
