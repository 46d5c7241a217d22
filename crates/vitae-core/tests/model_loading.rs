use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::{Value, json};
use vitae_core::schema::LINK;
use vitae_core::{Error, FieldValue, Item, Model};

fn load_fixture(name: &str) -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name);
    let contents =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing json at {}", path.display()));
    serde_json::from_str(&contents).expect("parse json")
}

fn minimal_raw() -> Value {
    json!({
        "lang": "en",
        "last_update": "2000-01-01",
        "basic": {"name": "John", "surnames": "Snow", "profession": "TV Star"},
        "contact": {"email": "john@snow.com", "phone": "+1 666 777 888"},
        "experience": []
    })
}

fn assert_clean(value: &Value, path: &str) {
    match value {
        Value::Null => panic!("null left in dump at {path}"),
        Value::String(text) if text.is_empty() => panic!("empty string left in dump at {path}"),
        Value::Number(number) if number.as_f64() == Some(-1.0) => {
            panic!("sentinel left in dump at {path}")
        }
        Value::Object(mapping) => {
            for (key, child) in mapping {
                if let Value::Array(items) = child {
                    assert!(!items.is_empty(), "empty list left in dump at {path}/{key}");
                }
                assert_clean(child, &format!("{path}/{key}"));
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                assert_clean(child, &format!("{path}/{idx}"));
            }
        }
        _ => {}
    }
}

#[test]
fn example_document_round_trips() {
    let raw = load_fixture("cv.example.json");
    let model = Model::load(&raw).expect("load example");

    let dumped = model.dump();
    let reloaded = Model::load(&dumped).expect("reload dumped example");
    assert_eq!(model, reloaded);
    assert_eq!(dumped, reloaded.dump());
}

#[test]
fn dump_never_contains_unset_values() {
    let mut raw = load_fixture("cv.example.json");
    raw["education"][0]["gpa"] = json!(-1);
    raw["education"][0]["major"] = json!("");
    raw["skills"][0]["score"] = json!(-1);

    let model = Model::load(&raw).expect("load example");
    let dumped = model.dump();
    assert_clean(&dumped, "");
    assert!(dumped["education"][0].get("gpa").is_none());
    assert!(dumped["skills"][0].get("score").is_none());
}

#[test]
fn minimal_document_omits_empty_sections() {
    let model = Model::load(&minimal_raw()).expect("load minimal");
    assert_eq!(model.section("experience").count(), 0);

    let dumped = model.dump();
    assert_eq!(
        dumped,
        json!({
            "lang": "en",
            "last_update": "2000-01-01",
            "basic": {"name": "John", "surnames": "Snow", "profession": "TV Star"},
            "contact": {"email": "john@snow.com", "phone": "+1 666 777 888"}
        })
    );
    assert_eq!(Model::load(&dumped).expect("reload minimal"), model);
}

#[test]
fn absent_sections_iterate_as_empty() {
    let model = Model::load(&minimal_raw()).expect("load minimal");
    for section in vitae_core::section_names() {
        assert_eq!(model.section(section).count(), 0, "section {section}");
        assert_eq!(
            model.root().field(section).map(|field| field.value().clone()),
            Some(FieldValue::List(Vec::new()))
        );
    }
}

#[test]
fn missing_required_fields_are_reported_with_paths() {
    let mut raw = minimal_raw();
    raw["basic"]
        .as_object_mut()
        .expect("basic mapping")
        .remove("surnames");
    assert_eq!(
        Model::load(&raw).unwrap_err(),
        Error::MissingField {
            path: "/basic/surnames".to_string()
        }
    );

    let mut raw = minimal_raw();
    raw.as_object_mut().expect("root mapping").remove("contact");
    assert_eq!(
        Model::load(&raw).unwrap_err(),
        Error::MissingField {
            path: "/contact".to_string()
        }
    );
}

#[test]
fn missing_optional_fields_load_as_null() {
    let model = Model::load(&minimal_raw()).expect("load minimal");
    let basic = model.basic().expect("basic");
    assert_eq!(basic.field("birthday").map(|f| f.value()), Some(&FieldValue::Null));
    assert!(model.get(&["contact", "github"]).is_none());
    assert!(model.get(&["contact", "github", "href"]).is_none());
}

#[test]
fn list_sections_read_through_get_are_never_none() {
    let mut raw = minimal_raw();
    raw.as_object_mut().expect("root mapping").remove("experience");
    let model = Model::load(&raw).expect("load minimal");

    for section in ["experience", "skills"] {
        let value = model.get(&[section]).expect("list section is always present");
        assert_eq!(value.as_list().map(<[FieldValue]>::len), Some(0), "section {section}");
    }
}

#[test]
fn malformed_dates_and_mismatched_types_fail() {
    let mut raw = minimal_raw();
    raw["last_update"] = json!("yesterday");
    assert!(matches!(
        Model::load(&raw).unwrap_err(),
        Error::Format { path, .. } if path == "/last_update"
    ));

    let mut raw = minimal_raw();
    raw["experience"] = json!({"institution": "x"});
    assert!(matches!(
        Model::load(&raw).unwrap_err(),
        Error::TypeMismatch { path, expected: "array", .. } if path == "/experience"
    ));

    let mut raw = load_fixture("cv.example.json");
    raw["education"][0]["gpa"] = json!("nine");
    assert!(matches!(
        Model::load(&raw).unwrap_err(),
        Error::TypeMismatch { path, expected: "number", .. } if path == "/education/0/gpa"
    ));
}

#[test]
fn link_accepts_name_as_anchor() {
    let link = Item::load(&LINK, &json!({"name": "A", "href": "http://x"})).expect("load link");
    assert_eq!(link.dump(), json!({"anchor": "A", "href": "http://x"}));
}

#[test]
fn reader_interface_reaches_nested_values() {
    let model = Model::load(&load_fixture("cv.example.json")).expect("load example");

    assert_eq!(model.lang(), "en");
    assert_eq!(model.last_update(), NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(
        model.get(&["contact", "github", "href"]).and_then(FieldValue::as_str),
        Some("https://github.com/ada")
    );
    assert_eq!(
        model.get(&["contact", "website", "anchor"]).and_then(FieldValue::as_str),
        Some("ada.example.com")
    );
    assert_eq!(
        model.get(&["contact", "scholar", "anchor"]).and_then(FieldValue::as_str),
        Some("Ada Lovelace")
    );
    assert_eq!(
        model.get(&["basic", "birthday"]).and_then(FieldValue::as_date),
        NaiveDate::from_ymd_opt(1815, 12, 10)
    );

    let positions: Vec<&str> = model
        .section("experience")
        .filter_map(|item| item.str("position"))
        .collect();
    assert_eq!(positions, vec!["Programmer", "Correspondent"]);

    let blocks: Vec<&str> = model
        .section("experience")
        .next()
        .expect("first experience")
        .items("description")
        .filter_map(|block| block.str("type"))
        .collect();
    assert_eq!(blocks, vec!["paragraph", "itemize"]);
}

#[test]
fn free_text_is_trimmed_and_aliases_are_normalized() {
    let model = Model::load(&load_fixture("cv.example.json")).expect("load example");
    let dumped = model.dump();

    assert_eq!(
        dumped["basic"]["biography"],
        json!("Mathematician and writer, chiefly known for her work on the Analytical Engine.")
    );
    assert_eq!(
        dumped["awards"][0]["description"],
        json!("For the notes on the Analytical Engine.")
    );
    assert!(dumped["contact"].get("personal_website").is_none());
    assert_eq!(dumped["contact"]["website"]["href"], json!("https://ada.example.com"));
    assert_eq!(dumped["contact"]["scholar"]["anchor"], json!("Ada Lovelace"));
}

#[test]
fn model_serializes_as_its_dump() {
    let model = Model::load(&minimal_raw()).expect("load minimal");
    let serialized = serde_json::to_value(&model).expect("serialize model");
    assert_eq!(serialized, model.dump());
}

#[test]
fn empty_rich_text_content_is_missing() {
    let mut raw = load_fixture("cv.example.json");
    raw["experience"][0]["description"][0]["content"] = json!("");
    assert_eq!(
        Model::load(&raw).unwrap_err(),
        Error::MissingField {
            path: "/experience/0/description/0/content".to_string()
        }
    );
}
