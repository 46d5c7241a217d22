use std::env;
use std::path::PathBuf;

use vitae_document::{DocumentError, ValidationReport, load_document, load_schema};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut cv_path: Option<PathBuf> = None;
    let mut schema_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--schema" => {
                schema_path = args.next().map(PathBuf::from);
            }
            _ => {
                if cv_path.is_none() {
                    cv_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let cv_path = cv_path.ok_or("missing document path")?;
    let schema = load_schema(schema_path.as_deref())?;

    let loaded = match load_document(&cv_path, &schema) {
        Ok(loaded) => loaded,
        Err(DocumentError::SchemaValidation(report)) => {
            eprintln!("document validation failed");
            print_report(&report);
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    if !loaded.warnings.is_empty() {
        eprintln!("document validated with warnings:");
        print_report(&ValidationReport {
            errors: Vec::new(),
            warnings: loaded.warnings,
        });
    } else {
        println!("document validated successfully");
    }

    Ok(())
}

fn print_report(report: &ValidationReport) {
    for issue in report.issues() {
        eprintln!("{issue}");
    }
}
