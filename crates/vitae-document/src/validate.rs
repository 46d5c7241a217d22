use jsonschema::JSONSchema;
use serde_json::Value;
use vitae_core::{FieldKind, ItemSchema, MODEL, Model, language_score};

use crate::errors::{DocumentError, ValidationIssue, ValidationReport};

/// Validate a raw document against a JSON Schema.
///
/// Schema violations are errors; keys no record declares are reported as warnings
/// because they are dropped when the document is saved.
pub fn validate_document_json(
    document: &Value,
    schema: &Value,
) -> Result<ValidationReport, DocumentError> {
    let compiled =
        JSONSchema::compile(schema).map_err(|err| DocumentError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push(ValidationIssue::error(
                "schema_violation",
                path,
                error.to_string(),
            ));
        }
    }

    report.extend(unknown_field_warnings(document));

    Ok(report)
}

/// Warn about keys that no record declares, walking nested records and lists.
pub fn unknown_field_warnings(document: &Value) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    collect_unknown_fields(&MODEL, document, "", &mut issues);
    issues
}

fn collect_unknown_fields(
    schema: &'static ItemSchema,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let Value::Object(mapping) = value else {
        return;
    };

    for (key, child) in mapping {
        let child_path = format!("{path}/{key}");
        let Some(spec) = schema
            .fields
            .iter()
            .find(|spec| spec.keys().any(|known| known == key))
        else {
            issues.push(
                ValidationIssue::warning(
                    "unknown_field",
                    child_path,
                    format!("'{key}' is not a field of {}", schema.name),
                )
                .with_hint("the field is ignored and will not be saved"),
            );
            continue;
        };

        let FieldKind::Item(nested) = spec.kind else {
            continue;
        };
        match child {
            Value::Array(elements) if spec.is_list() => {
                for (idx, element) in elements.iter().enumerate() {
                    collect_unknown_fields(nested, element, &format!("{child_path}/{idx}"), issues);
                }
            }
            _ => collect_unknown_fields(nested, child, &child_path, issues),
        }
    }
}

/// Consistency checks on a loaded model that the JSON Schema cannot express.
pub fn semantic_warnings(model: &Model) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for section in ["experience", "education"] {
        for (idx, item) in model.section(section).enumerate() {
            if let (Some(start), Some(end)) = (item.date("date_start"), item.date("date_end")) {
                if end < start {
                    issues.push(
                        ValidationIssue::warning(
                            "date_range_inverted",
                            format!("/{section}/{idx}/date_end"),
                            format!("date_end {end} is before date_start {start}"),
                        )
                        .with_hint("swap the dates or remove date_end for ongoing entries"),
                    );
                }
            }
        }
    }

    for (idx, item) in model.section("education").enumerate() {
        if let (Some(gpa), Some(gpa_max)) = (item.float("gpa"), item.float("gpa_max")) {
            if gpa > gpa_max {
                issues.push(ValidationIssue::warning(
                    "gpa_above_max",
                    format!("/education/{idx}/gpa"),
                    format!("gpa {gpa} is greater than gpa_max {gpa_max}"),
                ));
            }
        }
    }

    for (idx, item) in model.section("languages").enumerate() {
        let level = item.str("level").unwrap_or_default();
        if language_score(level).is_none() {
            issues.push(
                ValidationIssue::warning(
                    "unknown_language_level",
                    format!("/languages/{idx}/level"),
                    format!("'{level}' is not a recognized language level"),
                )
                .with_hint("use a CEFR level (A1, A2, B1, B2, C1, C2) or Native"),
            );
        }
    }

    issues
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
