use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;
use crate::field::FieldValue;
use crate::item::Item;
use crate::schema::MODEL;

/// A loaded résumé document.
///
/// Thin wrapper over the root [`Item`]; everything is read through [`Model::get`] or the
/// typed shortcuts below.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    root: Item,
}

impl Model {
    /// Load a raw document (already parsed from JSON or YAML).
    pub fn load(raw: &Value) -> Result<Self> {
        Item::load(&MODEL, raw).map(|root| Self { root })
    }

    /// Clean nested mapping, ready to be written as JSON or YAML.
    pub fn dump(&self) -> Value {
        self.root.dump()
    }

    pub fn get(&self, path: &[&str]) -> Option<&FieldValue> {
        self.root.get(path)
    }

    pub fn root(&self) -> &Item {
        &self.root
    }

    pub fn lang(&self) -> &str {
        self.root.str("lang").unwrap_or_default()
    }

    pub fn last_update(&self) -> Option<NaiveDate> {
        self.root.date("last_update")
    }

    pub fn basic(&self) -> Option<&Item> {
        self.root.item("basic")
    }

    pub fn contact(&self) -> Option<&Item> {
        self.root.item("contact")
    }

    /// Records of a list section (`experience`, `skills`, ...). Empty when absent.
    pub fn section(&self, name: &str) -> impl Iterator<Item = &Item> {
        self.root.items(name)
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
