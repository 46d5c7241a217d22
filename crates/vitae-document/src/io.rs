use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use vitae_core::Model;

use crate::errors::{DocumentError, Result, ValidationIssue};
use crate::format::DocumentFormat;
use crate::validate::{semantic_warnings, validate_document_json};

/// A validated, loaded document plus the non-fatal issues found on the way.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub model: Model,
    pub warnings: Vec<ValidationIssue>,
}

/// Which representations `save_document` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormats {
    pub json: bool,
    pub yaml: bool,
}

impl Default for OutputFormats {
    fn default() -> Self {
        Self {
            json: true,
            yaml: true,
        }
    }
}

impl OutputFormats {
    pub fn selected(self) -> impl Iterator<Item = DocumentFormat> {
        [
            (self.json, DocumentFormat::Json),
            (self.yaml, DocumentFormat::Yaml),
        ]
        .into_iter()
        .filter_map(|(enabled, format)| enabled.then_some(format))
    }
}

/// Read and parse a JSON or YAML document.
///
/// The extension is checked before the path itself, so an unsupported file is reported
/// as such even when it does not exist.
pub fn read_document(path: &Path) -> Result<Value> {
    let format = DocumentFormat::from_path(path)?;
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    let raw = format.parse(&contents)?;
    tracing::debug!(event = "document_read", path = %path.display(), format = %format);
    Ok(raw)
}

/// Read, validate and load a document from disk.
pub fn load_document(path: &Path, schema: &Value) -> Result<LoadedDocument> {
    let raw = read_document(path)?;
    load_document_value(&raw, schema)
}

/// Validate and load an already parsed document.
pub fn load_document_value(raw: &Value, schema: &Value) -> Result<LoadedDocument> {
    let report = validate_document_json(raw, schema)?;
    if !report.is_ok() {
        tracing::warn!(event = "document_rejected", errors = report.errors.len());
        return Err(DocumentError::SchemaValidation(report));
    }
    tracing::debug!(event = "document_validated", warnings = report.warnings.len());

    let model = Model::load(raw)?;
    let mut warnings = report.warnings;
    warnings.extend(semantic_warnings(&model));

    tracing::info!(event = "model_loaded", lang = %model.lang(), warnings = warnings.len());
    Ok(LoadedDocument { model, warnings })
}

/// Write the model as `<stem>.json` and/or `<stem>.yaml`. Returns the written paths.
pub fn save_document(model: &Model, stem: &Path, formats: OutputFormats) -> Result<Vec<PathBuf>> {
    let dumped = model.dump();
    let mut written = Vec::new();

    for format in formats.selected() {
        let path = format.path_for(stem);
        let encoded = format.render(&dumped)?;
        write_bytes_atomic(&path, encoded.as_bytes())?;
        tracing::info!(event = "document_saved", path = %path.display(), format = %format);
        written.push(path);
    }

    Ok(written)
}

/// Write through a sibling temp file and rename it over `path`.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let result = write_and_rename(&tmp_path, path, data);
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    Ok(result?)
}

fn write_and_rename(tmp_path: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    std::fs::rename(tmp_path, path)
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        DocumentError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid output path: {}", path.display()),
        ))
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}
