//! Declarative field layer for vitae.
//!
//! This crate defines the static record tables of a résumé document, the generic
//! loader/dumper that walks them, and the read-only queries renderers rely on.

pub mod error;
pub mod field;
pub mod item;
pub mod model;
pub mod queries;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use field::{Cardinality, DATE_FORMAT, Field, FieldKind, FieldSpec, FieldValue, UNSET_SENTINEL};
pub use item::{Item, ItemSchema};
pub use model::Model;
pub use queries::{
    age_on, language_score, projects_featured_first, skill_categories, skills_in_category,
};
pub use schema::{MODEL, section_names};
pub use validation::validate_item_schema;
