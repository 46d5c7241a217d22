use std::path::Path;

use schemars::Map;
use schemars::schema::{
    ArrayValidation, InstanceType, Metadata, ObjectValidation, RootSchema, Schema, SchemaObject,
    SingleOrVec, StringValidation, SubschemaValidation,
};
use serde_json::Value;
use vitae_core::{DATE_FORMAT, FieldKind, FieldSpec, ItemSchema, MODEL};

use crate::errors::Result;

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";
const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
// Strings the loader coerces into integers, numbers and booleans.
const INTEGER_PATTERN: &str = r"^\s*[+-]?\d+\s*$";
const NUMBER_PATTERN: &str = r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$";
const BOOLEAN_PATTERN: &str = r"^\s*(true|false)\s*$";

/// Emit the JSON Schema for résumé documents.
///
/// Derived from the record tables in `vitae_core::schema`, so the validator and the
/// loader always agree on names, kinds and required fields.
pub fn cv_json_schema() -> RootSchema {
    let mut definitions = Map::new();
    let mut schema = item_object(&MODEL, &mut definitions);
    schema.metadata = Some(Box::new(Metadata {
        title: Some("vitae résumé document".to_string()),
        description: Some(format!("Dates use the {DATE_FORMAT} calendar format.")),
        ..Default::default()
    }));

    RootSchema {
        meta_schema: Some(DRAFT_07.to_string()),
        schema,
        definitions,
    }
}

/// The generated schema as a JSON value, ready for validation.
pub fn cv_json_schema_value() -> Result<Value> {
    Ok(serde_json::to_value(cv_json_schema())?)
}

/// Read a schema override from disk, or fall back to the generated schema.
pub fn load_schema(path: Option<&Path>) -> Result<Value> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        }
        None => cv_json_schema_value(),
    }
}

fn item_object(schema: &'static ItemSchema, definitions: &mut Map<String, Schema>) -> SchemaObject {
    let mut object = ObjectValidation::default();
    let mut aliased_required = Vec::new();

    for spec in schema.fields {
        let property = field_schema(spec, definitions);
        for key in spec.keys() {
            object.properties.insert(key.to_string(), property.clone());
        }

        if spec.nullable {
            continue;
        }
        if spec.aliases.is_empty() {
            object.required.insert(spec.name.to_string());
        } else {
            // Any one of the accepted keys satisfies the requirement.
            aliased_required.push(any_of(spec.keys().map(required_key).collect()));
        }
    }

    SchemaObject {
        instance_type: Some(InstanceType::Object.into()),
        object: Some(Box::new(object)),
        subschemas: if aliased_required.is_empty() {
            None
        } else {
            Some(Box::new(SubschemaValidation {
                all_of: Some(aliased_required),
                ..Default::default()
            }))
        },
        ..Default::default()
    }
}

fn field_schema(spec: &FieldSpec, definitions: &mut Map<String, Schema>) -> Schema {
    let value = kind_schema(spec.kind, definitions);
    let schema = if spec.is_list() {
        Schema::Object(SchemaObject {
            instance_type: Some(InstanceType::Array.into()),
            array: Some(Box::new(ArrayValidation {
                items: Some(value.into()),
                ..Default::default()
            })),
            ..Default::default()
        })
    } else {
        value
    };

    if spec.nullable {
        any_of(vec![schema, typed(InstanceType::Null)])
    } else {
        schema
    }
}

fn kind_schema(kind: FieldKind, definitions: &mut Map<String, Schema>) -> Schema {
    match kind {
        // Numbers and booleans are accepted and stored as their text.
        FieldKind::Str => Schema::Object(SchemaObject {
            instance_type: Some(SingleOrVec::Vec(vec![
                InstanceType::String,
                InstanceType::Number,
                InstanceType::Boolean,
            ])),
            ..Default::default()
        }),
        FieldKind::Int => any_of(vec![
            typed(InstanceType::Integer),
            string_matching(INTEGER_PATTERN),
        ]),
        FieldKind::Float => any_of(vec![
            typed(InstanceType::Number),
            string_matching(NUMBER_PATTERN),
        ]),
        FieldKind::Bool => any_of(vec![
            typed(InstanceType::Boolean),
            string_matching(BOOLEAN_PATTERN),
        ]),
        FieldKind::Date => {
            let mut schema = string_matching(DATE_PATTERN);
            if let Schema::Object(object) = &mut schema {
                object.format = Some("date".to_string());
            }
            schema
        }
        FieldKind::Json => Schema::Bool(true),
        FieldKind::Item(nested) => {
            if !definitions.contains_key(nested.name) {
                let object = item_object(nested, definitions);
                definitions.insert(nested.name.to_string(), Schema::Object(object));
            }
            Schema::Object(SchemaObject {
                reference: Some(format!("#/definitions/{}", nested.name)),
                ..Default::default()
            })
        }
    }
}

fn typed(instance_type: InstanceType) -> Schema {
    Schema::Object(SchemaObject {
        instance_type: Some(instance_type.into()),
        ..Default::default()
    })
}

fn string_matching(pattern: &str) -> Schema {
    Schema::Object(SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        string: Some(Box::new(StringValidation {
            pattern: Some(pattern.to_string()),
            ..Default::default()
        })),
        ..Default::default()
    })
}

fn any_of(schemas: Vec<Schema>) -> Schema {
    Schema::Object(SchemaObject {
        subschemas: Some(Box::new(SubschemaValidation {
            any_of: Some(schemas),
            ..Default::default()
        })),
        ..Default::default()
    })
}

fn required_key(key: &str) -> Schema {
    let mut object = ObjectValidation::default();
    object.required.insert(key.to_string());
    Schema::Object(SchemaObject {
        object: Some(Box::new(object)),
        ..Default::default()
    })
}
