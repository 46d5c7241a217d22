use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::field::{Field, FieldSpec, FieldValue, json_kind};

/// Static declaration of a record: its name and ordered field specs.
#[derive(Debug)]
pub struct ItemSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ItemSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }
}

/// A loaded record. Owns one [`Field`] per declared spec, in declaration order.
#[derive(Debug, Clone)]
pub struct Item {
    schema: &'static ItemSchema,
    fields: Vec<Field>,
}

impl Item {
    /// Load a record from a raw mapping.
    pub fn load(schema: &'static ItemSchema, raw: &Value) -> Result<Self> {
        Self::load_at(schema, raw, "")
    }

    pub(crate) fn load_at(schema: &'static ItemSchema, raw: &Value, path: &str) -> Result<Self> {
        let Value::Object(mapping) = raw else {
            return Err(Error::TypeMismatch {
                path: if path.is_empty() {
                    "/".to_string()
                } else {
                    path.to_string()
                },
                expected: schema.name,
                found: json_kind(raw),
            });
        };

        let mut fields = Vec::with_capacity(schema.fields.len());
        for spec in schema.fields {
            let mut field = Field::new(spec);
            field.load(mapping, path)?;
            fields.push(field);
        }

        Ok(Self { schema, fields })
    }

    pub fn schema(&self) -> &'static ItemSchema {
        self.schema
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Clean mapping form: unset values (null, `""`, `-1`, empty lists) are omitted.
    pub fn dump_map(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|field| !field.value().is_unset())
            .filter_map(|field| field.dump().map(|value| (field.name().to_string(), value)))
            .collect()
    }

    pub fn dump(&self) -> Value {
        Value::Object(self.dump_map())
    }

    /// Descend through nested records by field name and return the leaf value.
    ///
    /// List leaves are always returned, empty when the section is absent, so callers
    /// can iterate them unconditionally. Scalar leaves are `None` when unset. A null
    /// intermediate record or an unknown name also yields `None`.
    pub fn get(&self, path: &[&str]) -> Option<&FieldValue> {
        let (first, rest) = path.split_first()?;
        let field = self.field(first)?;
        let value = field.value();
        if !rest.is_empty() {
            return value.as_item()?.get(rest);
        }
        if field.spec().is_list() || !value.is_unset() {
            Some(value)
        } else {
            None
        }
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.get(&[name])
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(FieldValue::as_str)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(FieldValue::as_i64)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(FieldValue::as_f64)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(FieldValue::as_bool)
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.value(name).and_then(FieldValue::as_date)
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.value(name).and_then(FieldValue::as_item)
    }

    /// Records of a list field, in source order. Empty for unknown or unset fields.
    pub fn items(&self, name: &str) -> impl Iterator<Item = &Item> {
        self.field(name)
            .and_then(|field| field.value().as_list())
            .unwrap_or_default()
            .iter()
            .filter_map(FieldValue::as_item)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.dump() == other.dump()
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.dump().serialize(serializer)
    }
}
