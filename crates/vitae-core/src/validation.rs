use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::field::FieldKind;
use crate::item::ItemSchema;

/// Validate internal consistency of a record declaration and every record it nests.
///
/// This checks:
/// - duplicate field names within one record
/// - aliases that collide with another field's name or alias
/// - records without fields
pub fn validate_item_schema(schema: &'static ItemSchema) -> Result<()> {
    let mut visited = BTreeSet::new();
    validate_recursive(schema, &mut visited)
}

fn validate_recursive(
    schema: &'static ItemSchema,
    visited: &mut BTreeSet<&'static str>,
) -> Result<()> {
    if !visited.insert(schema.name) {
        return Ok(());
    }

    if schema.fields.is_empty() {
        return Err(Error::InvalidSchema(format!(
            "record declares no fields: {}",
            schema.name
        )));
    }

    let mut keys = BTreeSet::new();
    for spec in schema.fields {
        for key in spec.keys() {
            if !keys.insert(key) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate field key: {}.{}",
                    schema.name, key
                )));
            }
        }
    }

    for spec in schema.fields {
        if let FieldKind::Item(nested) = spec.kind {
            validate_recursive(nested, visited)?;
        }
    }

    Ok(())
}
