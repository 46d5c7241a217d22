use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};
use crate::item::{Item, ItemSchema};

/// Calendar date representation used on both sides of the document.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reserved numeric value meaning "unset" in source documents.
pub const UNSET_SENTINEL: i64 = -1;

/// Declared kind of a field, either a primitive or a nested record.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Str,
    Int,
    Float,
    Bool,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    Date,
    /// Untyped value kept exactly as found (rich-text content).
    Json,
    Item(&'static ItemSchema),
}

impl FieldKind {
    /// Short name used in error messages and generated schemas.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Str => "string",
            FieldKind::Int => "integer",
            FieldKind::Float => "number",
            FieldKind::Bool => "boolean",
            FieldKind::Date => "date",
            FieldKind::Json => "any",
            FieldKind::Item(schema) => schema.name,
        }
    }
}

/// Whether a field holds one value or an ordered sequence of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// Static description of one named attribute of a record.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Key in the raw mapping and in the dumped output.
    pub name: &'static str,
    /// Alternative raw keys accepted on load. Never emitted on dump.
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
    pub cardinality: Cardinality,
    pub nullable: bool,
    /// Strip trailing whitespace from string values.
    pub trim_end: bool,
}

impl FieldSpec {
    /// A single value that must be present.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            aliases: &[],
            kind,
            cardinality: Cardinality::One,
            nullable: false,
            trim_end: false,
        }
    }

    /// A single value that may be absent.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            nullable: true,
            ..Self::required(name, kind)
        }
    }

    /// An optional list; loads as an empty sequence when absent.
    pub const fn list(name: &'static str, kind: FieldKind) -> Self {
        Self {
            cardinality: Cardinality::Many,
            ..Self::optional(name, kind)
        }
    }

    pub const fn alias(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    pub const fn trimmed(self) -> Self {
        Self {
            trim_end: true,
            ..self
        }
    }

    pub fn is_list(&self) -> bool {
        self.cardinality == Cardinality::Many
    }

    /// Every raw key this field answers to, canonical name first.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    fn lookup<'a>(&self, raw: &'a Map<String, Value>) -> Option<&'a Value> {
        self.keys()
            .find_map(|key| raw.get(key).filter(|value| !value.is_null()))
    }
}

/// Loaded value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Json(Value),
    Item(Item),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// True for values that are omitted from dumped output: null, empty string, the
    /// `-1` sentinel and empty lists.
    pub fn is_unset(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Str(value) => value.is_empty(),
            FieldValue::Int(value) => *value == UNSET_SENTINEL,
            FieldValue::Float(value) => *value == UNSET_SENTINEL as f64,
            FieldValue::Json(value) => match value {
                Value::Null => true,
                Value::String(text) => text.is_empty(),
                Value::Number(number) => number.as_f64() == Some(UNSET_SENTINEL as f64),
                Value::Array(elements) => elements.is_empty(),
                Value::Bool(_) | Value::Object(_) => false,
            },
            FieldValue::List(values) => values.is_empty(),
            FieldValue::Bool(_) | FieldValue::Date(_) | FieldValue::Item(_) => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(value) => Some(*value),
            FieldValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            FieldValue::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            FieldValue::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Serializable form of the value. Nested items are dumped recursively.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Str(value) => Value::String(value.clone()),
            FieldValue::Int(value) => Value::from(*value),
            FieldValue::Float(value) => Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Bool(value) => Value::Bool(*value),
            FieldValue::Date(value) => Value::String(value.format(DATE_FORMAT).to_string()),
            FieldValue::Json(value) => value.clone(),
            FieldValue::Item(item) => item.dump(),
            FieldValue::List(values) => {
                Value::Array(values.iter().map(FieldValue::to_json).collect())
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Str(value) => f.write_str(value),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value}"),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Date(value) => write!(f, "{}", value.format(DATE_FORMAT)),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A field of one record instance: its static spec plus the value owned by that
/// instance.
#[derive(Debug, Clone)]
pub struct Field {
    spec: &'static FieldSpec,
    value: FieldValue,
}

impl Field {
    pub fn new(spec: &'static FieldSpec) -> Self {
        Self {
            spec,
            value: FieldValue::Null,
        }
    }

    pub fn spec(&self) -> &'static FieldSpec {
        self.spec
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Load this field from the mapping of its enclosing record.
    ///
    /// `parent` is the JSON pointer of that mapping and is only used to tag errors.
    pub fn load(&mut self, raw: &Map<String, Value>, parent: &str) -> Result<()> {
        let path = child_path(parent, self.spec.name);

        let value = match self.spec.lookup(raw) {
            None if !self.spec.nullable => return Err(Error::MissingField { path }),
            None if self.spec.is_list() => FieldValue::List(Vec::new()),
            None => FieldValue::Null,
            Some(source) => match self.spec.cardinality {
                Cardinality::Many => load_list(self.spec, source, &path)?,
                Cardinality::One => load_value(self.spec, source, &path)?,
            },
        };

        if !self.spec.nullable && value.is_unset() {
            return Err(Error::MissingField { path });
        }

        self.value = value;
        Ok(())
    }

    /// Serializable form of the field, `None` when the value is null.
    pub fn dump(&self) -> Option<Value> {
        match &self.value {
            FieldValue::Null => None,
            value => Some(value.to_json()),
        }
    }
}

fn load_list(spec: &FieldSpec, source: &Value, path: &str) -> Result<FieldValue> {
    let Value::Array(elements) = source else {
        return Err(Error::TypeMismatch {
            path: path.to_string(),
            expected: "array",
            found: json_kind(source),
        });
    };

    elements
        .iter()
        .enumerate()
        .map(|(idx, element)| load_value(spec, element, &child_path(path, idx)))
        .collect::<Result<Vec<_>>>()
        .map(FieldValue::List)
}

fn load_value(spec: &FieldSpec, source: &Value, path: &str) -> Result<FieldValue> {
    let mismatch = || Error::TypeMismatch {
        path: path.to_string(),
        expected: spec.kind.label(),
        found: json_kind(source),
    };

    match spec.kind {
        FieldKind::Str => {
            let text = match source {
                Value::String(value) => value.clone(),
                Value::Number(value) => value.to_string(),
                Value::Bool(value) => value.to_string(),
                _ => return Err(mismatch()),
            };
            if spec.trim_end {
                Ok(FieldValue::Str(text.trim_end().to_string()))
            } else {
                Ok(FieldValue::Str(text))
            }
        }
        FieldKind::Int => match source {
            Value::Number(value) => value
                .as_i64()
                .or_else(|| value.as_f64().and_then(integral_f64))
                .map(FieldValue::Int)
                .ok_or_else(mismatch),
            Value::String(value) => value
                .trim()
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        },
        FieldKind::Float => match source {
            Value::Number(value) => value.as_f64().map(FieldValue::Float).ok_or_else(mismatch),
            Value::String(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite())
                .map(FieldValue::Float)
                .ok_or_else(mismatch),
            _ => Err(mismatch()),
        },
        FieldKind::Bool => match source {
            Value::Bool(value) => Ok(FieldValue::Bool(*value)),
            Value::String(value) => match value.trim() {
                "true" => Ok(FieldValue::Bool(true)),
                "false" => Ok(FieldValue::Bool(false)),
                _ => Err(mismatch()),
            },
            _ => Err(mismatch()),
        },
        FieldKind::Date => match source {
            Value::String(value) => parse_date(value, path).map(FieldValue::Date),
            _ => Err(mismatch()),
        },
        FieldKind::Json => Ok(FieldValue::Json(source.clone())),
        FieldKind::Item(schema) => Item::load_at(schema, source, path).map(FieldValue::Item),
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str, path: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| Error::Format {
        path: path.to_string(),
        message: format!("expected a YYYY-MM-DD date, got '{value}' ({err})"),
    })
}

fn integral_f64(value: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, which does not fit.
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

pub(crate) fn child_path(parent: &str, segment: impl fmt::Display) -> String {
    format!("{parent}/{segment}")
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
