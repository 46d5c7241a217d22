//! Read-only helpers renderers use on a loaded [`Model`].

use chrono::{Datelike, NaiveDate};

use crate::item::Item;
use crate::model::Model;

/// Completed years between `birthday` and `today`.
pub fn age_on(birthday: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday = (today.month(), today.day()) < (birthday.month(), birthday.day());
    today.year() - birthday.year() - i32::from(before_birthday)
}

/// Numeric score for a CEFR language level, `None` for unknown levels.
pub fn language_score(level: &str) -> Option<u8> {
    match level {
        "A1" => Some(40),
        "A2" => Some(50),
        "B1" => Some(60),
        "B2" => Some(70),
        "C1" => Some(80),
        "C2" => Some(90),
        "Native" => Some(100),
        _ => None,
    }
}

impl Model {
    /// Age of the person on `today`, when a birthday is present.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.basic()
            .and_then(|basic| basic.date("birthday"))
            .map(|birthday| age_on(birthday, today))
    }
}

/// Unique non-empty skill categories in first-seen order.
pub fn skill_categories(model: &Model) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for category in model.section("skills").filter_map(|skill| skill.str("category")) {
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    categories
}

/// Skills in `category`, or every skill when `category` is `None`.
pub fn skills_in_category<'a>(model: &'a Model, category: Option<&str>) -> Vec<&'a Item> {
    model
        .section("skills")
        .filter(|skill| category.is_none() || skill.str("category") == category)
        .collect()
}

/// Projects with `featured == true` first; relative order is otherwise kept.
pub fn projects_featured_first(model: &Model) -> Vec<&Item> {
    let mut projects: Vec<&Item> = model.section("projects").collect();
    projects.sort_by_key(|project| !project.bool("featured").unwrap_or(false));
    projects
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn model_with(sections: serde_json::Value) -> Model {
        let mut raw = json!({
            "lang": "en",
            "last_update": "2020-05-01",
            "basic": {"name": "Ada", "surnames": "Lovelace", "profession": "Analyst",
                      "birthday": "1990-06-15"},
            "contact": {"email": "ada@example.com", "phone": "+44 1"}
        });
        if let (Some(target), Some(extra)) = (raw.as_object_mut(), sections.as_object()) {
            target.extend(extra.clone());
        }
        Model::load(&raw).expect("load model")
    }

    #[test]
    fn age_counts_completed_years() {
        let birthday = date(1990, 6, 15);
        assert_eq!(age_on(birthday, date(2020, 6, 14)), 29);
        assert_eq!(age_on(birthday, date(2020, 6, 15)), 30);
        assert_eq!(age_on(birthday, date(2021, 1, 1)), 30);

        let model = model_with(json!({}));
        assert_eq!(model.age_on(date(2020, 6, 15)), Some(30));
    }

    #[test]
    fn language_levels_map_to_scores() {
        assert_eq!(language_score("A1"), Some(40));
        assert_eq!(language_score("C2"), Some(90));
        assert_eq!(language_score("Native"), Some(100));
        assert_eq!(language_score("fluent"), None);
    }

    #[test]
    fn skills_group_by_category() {
        let model = model_with(json!({
            "skills": [
                {"name": "Rust", "category": "Languages"},
                {"name": "Git"},
                {"name": "Python", "category": "Languages"},
                {"name": "Docker", "category": "Tools", "type": "infra"}
            ]
        }));

        assert_eq!(skill_categories(&model), vec!["Languages", "Tools"]);

        let languages: Vec<&str> = skills_in_category(&model, Some("Languages"))
            .iter()
            .filter_map(|skill| skill.str("name"))
            .collect();
        assert_eq!(languages, vec!["Rust", "Python"]);
        assert_eq!(skills_in_category(&model, None).len(), 4);
    }

    #[test]
    fn featured_projects_come_first() {
        let model = model_with(json!({
            "projects": [
                {"name": "a"},
                {"name": "b", "featured": true},
                {"name": "c", "featured": false},
                {"name": "d", "featured": true}
            ]
        }));

        let names: Vec<&str> = projects_featured_first(&model)
            .iter()
            .filter_map(|project| project.str("name"))
            .collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }
}
