//! Document pipeline for vitae.
//!
//! Reads JSON/YAML résumé documents, validates them against the JSON Schema derived
//! from the record tables, loads them into a [`vitae_core::Model`] and writes them back
//! as clean JSON and YAML.

pub mod errors;
pub mod format;
pub mod io;
pub mod schema;
pub mod validate;

pub use errors::{DocumentError, IssueSeverity, Result, ValidationIssue, ValidationReport};
pub use format::DocumentFormat;
pub use io::{
    LoadedDocument, OutputFormats, load_document, load_document_value, read_document,
    save_document, write_bytes_atomic,
};
pub use schema::{cv_json_schema, cv_json_schema_value, load_schema};
pub use validate::{semantic_warnings, unknown_field_warnings, validate_document_json};
