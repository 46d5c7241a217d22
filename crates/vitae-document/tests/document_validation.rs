use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use vitae_core::Model;
use vitae_document::{
    DocumentError, DocumentFormat, IssueSeverity, cv_json_schema_value, semantic_warnings,
    validate_document_json,
};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> Value {
    let path = fixture_path(name);
    let contents =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture at {}", path.display()));
    DocumentFormat::from_path(&path)
        .and_then(|format| format.parse(&contents))
        .expect("parse fixture")
}

fn schema() -> Value {
    cv_json_schema_value().expect("generate cv schema")
}

fn error_paths(document: &Value) -> Vec<String> {
    validate_document_json(document, &schema())
        .expect("validate document")
        .errors
        .into_iter()
        .map(|issue| issue.path)
        .collect()
}

#[test]
fn fixtures_validate_against_generated_schema() {
    for name in ["cv.example.json", "cv.minimal.json", "cv.reduced.yaml"] {
        let report =
            validate_document_json(&load_fixture(name), &schema()).expect("validate fixture");
        assert!(report.errors.is_empty(), "{name}: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "{name}: {:?}", report.warnings);
    }
}

#[test]
fn missing_required_field_is_a_violation() {
    let mut document = load_fixture("cv.minimal.json");
    document["basic"]
        .as_object_mut()
        .expect("basic mapping")
        .remove("name");

    assert!(error_paths(&document).contains(&"/basic".to_string()));
}

#[test]
fn wrong_types_and_malformed_dates_are_violations() {
    let mut document = load_fixture("cv.example.json");
    document["education"][0]["gpa"] = json!("nine");
    document["last_update"] = json!("01/03/2024");
    document["projects"][0]["featured"] = json!("yes");

    let paths = error_paths(&document);
    assert!(paths.contains(&"/education/0/gpa".to_string()), "{paths:?}");
    assert!(paths.contains(&"/last_update".to_string()), "{paths:?}");
    assert!(paths.contains(&"/projects/0/featured".to_string()), "{paths:?}");
}

#[test]
fn link_anchor_may_use_its_alias() {
    let mut document = load_fixture("cv.minimal.json");
    document["contact"]["github"] = json!({"name": "john", "href": "https://github.com/john"});
    assert!(error_paths(&document).is_empty());

    document["contact"]["github"] = json!({"href": "https://github.com/john"});
    assert!(error_paths(&document).contains(&"/contact/github".to_string()));
}

#[test]
fn explicit_nulls_are_accepted_for_optional_fields() {
    let mut document = load_fixture("cv.minimal.json");
    document["basic"]["birthday"] = Value::Null;
    document["awards"] = Value::Null;
    assert!(error_paths(&document).is_empty());
}

#[test]
fn unknown_fields_are_warnings() {
    let mut document = load_fixture("cv.example.json");
    document["basic"]["nickname"] = json!("Enchantress of Numbers");
    document["skills"][1]["level"] = json!("expert");
    document["theme"] = json!("sitges");

    let report = validate_document_json(&document, &schema()).expect("validate document");
    assert!(report.is_ok());

    let paths: Vec<&str> = report
        .warnings
        .iter()
        .filter(|issue| issue.code == "unknown_field")
        .map(|issue| issue.path.as_str())
        .collect();
    assert_eq!(paths, vec!["/basic/nickname", "/skills/1/level", "/theme"]);
    assert!(
        report
            .warnings
            .iter()
            .all(|issue| issue.severity == IssueSeverity::Warning)
    );
}

#[test]
fn semantic_checks_flag_inconsistent_values() {
    let mut document = load_fixture("cv.example.json");
    document["experience"][0]["date_end"] = json!("1800-01-01");
    document["education"][0]["gpa"] = json!(11);
    document["languages"][1]["level"] = json!("fluent");

    let model = Model::load(&document).expect("load model");
    let codes: Vec<(String, String)> = semantic_warnings(&model)
        .into_iter()
        .map(|issue| (issue.code, issue.path))
        .collect();

    assert_eq!(
        codes,
        vec![
            (
                "date_range_inverted".to_string(),
                "/experience/0/date_end".to_string()
            ),
            ("gpa_above_max".to_string(), "/education/0/gpa".to_string()),
            (
                "unknown_language_level".to_string(),
                "/languages/1/level".to_string()
            ),
        ]
    );
}

#[test]
fn invalid_schema_is_reported() {
    let result = validate_document_json(&json!({}), &json!({"type": 12}));
    assert!(matches!(result, Err(DocumentError::Schema(_))));
}
