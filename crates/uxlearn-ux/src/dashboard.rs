//! Module overview cards with progress derived from completed lesson ids.

use serde::Serialize;
use std::collections::BTreeSet;
use uxlearn_kernel::{Catalog, Category};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonEntry {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCard {
    pub key: String,
    pub number: String,
    pub title: String,
    pub lesson_count: usize,
    pub completed: usize,
    pub progress_percent: u8,
    pub lessons: Vec<LessonEntry>,
}

impl ModuleCard {
    pub fn from_category(category: &Category, completed: &BTreeSet<String>) -> Self {
        let lessons: Vec<LessonEntry> = category
            .lessons
            .iter()
            .map(|lesson| LessonEntry {
                id: lesson.id.clone(),
                title: lesson.title.clone(),
                completed: completed.contains(&lesson.id),
            })
            .collect();
        let done = lessons.iter().filter(|l| l.completed).count();
        Self {
            key: category.key.clone(),
            number: category.id.clone(),
            title: category.title.clone(),
            lesson_count: lessons.len(),
            completed: done,
            progress_percent: progress_percent(done, lessons.len()),
            lessons,
        }
    }
}

/// One card per category, in catalog order. Ids in `completed` that name no
/// lesson are ignored.
pub fn module_cards(catalog: &Catalog, completed: &BTreeSet<String>) -> Vec<ModuleCard> {
    catalog
        .categories()
        .iter()
        .map(|category| ModuleCard::from_category(category, completed))
        .collect()
}

fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}

/// Parse a comma-separated list of lesson ids, ignoring blanks.
pub fn parse_completed(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_rounds_and_handles_empty_modules() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(6, 6), 100);
    }

    #[test]
    fn cards_follow_catalog_order_and_mark_completed_lessons() {
        let completed = parse_completed("3-1, 3-2,,1-1,does-not-exist");
        let cards = module_cards(Catalog::builtin(), &completed);
        let keys: Vec<&str> = cards.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["ux-basics", "ux-design", "ux-psychology", "ux-process"]
        );

        let psychology = &cards[2];
        assert_eq!(psychology.number, "3");
        assert_eq!(psychology.lesson_count, 6);
        assert_eq!(psychology.completed, 2);
        assert_eq!(psychology.progress_percent, 33);
        assert!(psychology.lessons[0].completed);
        assert!(!psychology.lessons[2].completed);

        assert_eq!(cards[0].progress_percent, 50);
        assert_eq!(cards[3].completed, 0);
    }

    #[test]
    fn card_serializes_camel_case() {
        let cards = module_cards(Catalog::builtin(), &BTreeSet::new());
        insta::assert_json_snapshot!(&cards[3], @r#"
        {
          "key": "ux-process",
          "number": "4",
          "title": "UX Process",
          "lessonCount": 1,
          "completed": 0,
          "progressPercent": 0,
          "lessons": [
            {
              "id": "4-1",
              "title": "Het UX-proces",
              "completed": false
            }
          ]
        }
        "#);
    }
}
