//! Record declarations for the résumé document.
//!
//! Each record is a static table of field specs; [`MODEL`] is the root.

use crate::field::FieldKind::{Bool, Date, Float, Int, Item, Json, Str};
use crate::field::FieldSpec;
use crate::item::ItemSchema;

/// Hyperlink with a display text.
pub static LINK: ItemSchema = ItemSchema {
    name: "Link",
    fields: &[
        FieldSpec::required("anchor", Str).alias(&["name"]),
        FieldSpec::required("href", Str),
    ],
};

/// Block of rich text: a `paragraph` (string content) or an `itemize` (list content).
pub static RICH_TEXT_BLOCK: ItemSchema = ItemSchema {
    name: "RichTextBlock",
    fields: &[
        FieldSpec::required("type", Str),
        FieldSpec::required("content", Json),
    ],
};

pub static BASIC_INFO: ItemSchema = ItemSchema {
    name: "BasicInfo",
    fields: &[
        FieldSpec::required("name", Str),
        FieldSpec::required("surnames", Str),
        FieldSpec::required("profession", Str),
        FieldSpec::optional("birthday", Date),
        FieldSpec::optional("birthplace", Str),
        FieldSpec::optional("residence", Str),
        FieldSpec::optional("marital_status", Str),
        FieldSpec::optional("biography", Str).trimmed(),
        FieldSpec::optional("hobbies", Str).trimmed(),
    ],
};

pub static CONTACT: ItemSchema = ItemSchema {
    name: "Contact",
    fields: &[
        FieldSpec::required("email", Str),
        FieldSpec::required("phone", Str),
        FieldSpec::optional("website", Item(&LINK)).alias(&["personal_website"]),
        FieldSpec::optional("twitter", Item(&LINK)),
        FieldSpec::optional("linkedin", Item(&LINK)),
        FieldSpec::optional("github", Item(&LINK)),
        FieldSpec::optional("scholar", Item(&LINK)),
    ],
};

pub static EXPERIENCE: ItemSchema = ItemSchema {
    name: "Experience",
    fields: &[
        FieldSpec::required("institution", Str),
        FieldSpec::required("position", Str),
        FieldSpec::required("date_start", Date),
        FieldSpec::optional("date_end", Date),
        FieldSpec::list("description", Item(&RICH_TEXT_BLOCK)),
    ],
};

pub static EDUCATION: ItemSchema = ItemSchema {
    name: "Education",
    fields: &[
        FieldSpec::required("institution", Str),
        FieldSpec::required("degree", Str),
        FieldSpec::optional("major", Str),
        FieldSpec::required("date_start", Date),
        FieldSpec::optional("date_end", Date),
        FieldSpec::list("description", Item(&RICH_TEXT_BLOCK)),
        FieldSpec::optional("gpa", Float),
        FieldSpec::optional("gpa_max", Float),
        FieldSpec::optional("performance", Float),
        FieldSpec::optional("promotion_order", Str),
    ],
};

pub static AWARD: ItemSchema = ItemSchema {
    name: "Award",
    fields: &[
        FieldSpec::required("institution", Str),
        FieldSpec::required("name", Str),
        FieldSpec::required("date", Date),
        FieldSpec::optional("description", Str).trimmed(),
        FieldSpec::optional("diploma", Item(&LINK)),
    ],
};

pub static PUBLICATION: ItemSchema = ItemSchema {
    name: "Publication",
    fields: &[
        FieldSpec::required("title", Str),
        FieldSpec::optional("abstract", Str).trimmed(),
        FieldSpec::required("authors", Str),
        FieldSpec::optional("conference", Str),
        FieldSpec::required("date", Date),
        FieldSpec::optional("manuscript_link", Item(&LINK)),
        FieldSpec::optional("code_link", Item(&LINK)),
    ],
};

pub static LANGUAGE: ItemSchema = ItemSchema {
    name: "Language",
    fields: &[
        FieldSpec::required("name", Str),
        FieldSpec::required("level", Str),
        FieldSpec::optional("diploma", Item(&LINK)),
    ],
};

pub static COURSE: ItemSchema = ItemSchema {
    name: "Course",
    fields: &[
        FieldSpec::required("institution", Str),
        FieldSpec::required("name", Str),
        FieldSpec::required("date", Date),
        FieldSpec::optional("diploma", Item(&LINK)),
    ],
};

pub static PROJECT: ItemSchema = ItemSchema {
    name: "Project",
    fields: &[
        FieldSpec::optional("featured", Bool),
        FieldSpec::required("name", Str),
        FieldSpec::optional("description", Str).trimmed(),
        FieldSpec::optional("link", Item(&LINK)),
    ],
};

pub static SKILL: ItemSchema = ItemSchema {
    name: "Skill",
    fields: &[
        FieldSpec::required("name", Str),
        FieldSpec::optional("type", Str),
        FieldSpec::optional("category", Str),
        FieldSpec::optional("score", Int),
        FieldSpec::optional("highlighted", Bool),
    ],
};

/// Root record of a résumé document.
pub static MODEL: ItemSchema = ItemSchema {
    name: "Model",
    fields: &[
        FieldSpec::required("lang", Str),
        FieldSpec::required("last_update", Date),
        FieldSpec::required("basic", Item(&BASIC_INFO)),
        FieldSpec::required("contact", Item(&CONTACT)),
        FieldSpec::list("experience", Item(&EXPERIENCE)),
        FieldSpec::list("education", Item(&EDUCATION)),
        FieldSpec::list("awards", Item(&AWARD)),
        FieldSpec::list("publications", Item(&PUBLICATION)),
        FieldSpec::list("languages", Item(&LANGUAGE)),
        FieldSpec::list("courses", Item(&COURSE)),
        FieldSpec::list("projects", Item(&PROJECT)),
        FieldSpec::list("skills", Item(&SKILL)),
    ],
};

/// Names of the list sections of [`MODEL`], in declaration order.
pub fn section_names() -> impl Iterator<Item = &'static str> {
    MODEL
        .fields
        .iter()
        .filter(|spec| spec.is_list())
        .map(|spec| spec.name)
}
