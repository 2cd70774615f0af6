//! Lesson resolution by identifier.
//!
//! Identifiers follow `<moduleNumber>-<lessonNumber>`. Resolution first scans
//! the whole catalog for an exact match, then falls back to the category
//! named by the identifier's module prefix.

use crate::catalog::{Catalog, Category, Lesson};
use crate::error::LessonError;
use regex::Regex;
use std::sync::OnceLock;

/// Fixed module-number table used by the prefix fallback.
pub const MODULE_NAMES: [(&str, &str); 4] = [
    ("1", "basics"),
    ("2", "design"),
    ("3", "psychology"),
    ("4", "process"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub lesson: &'a Lesson,
    pub category: &'a Category,
}

fn module_prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)-").expect("static module prefix pattern"))
}

/// Leading module number of a lesson identifier (`"3-1"` → `"3"`).
pub fn module_prefix(lesson_id: &str) -> Option<&str> {
    module_prefix_pattern()
        .captures(lesson_id)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Module name for a module number (`"3"` → `"psychology"`).
pub fn module_name(prefix: &str) -> Option<&'static str> {
    MODULE_NAMES
        .iter()
        .find(|(number, _)| *number == prefix)
        .map(|(_, name)| *name)
}

/// Catalog key of the category a module number maps to.
pub fn module_category_key(prefix: &str) -> Option<String> {
    module_name(prefix).map(|name| format!("ux-{name}"))
}

impl Catalog {
    /// Resolve a lesson identifier.
    ///
    /// Every category is scanned for an exact match first. Failing that,
    /// only the category named by the identifier's module prefix is searched.
    ///
    /// Never panics: empty, garbage, and unknown-module identifiers all
    /// yield [`LessonError::NotFound`].
    pub fn resolve(&self, lesson_id: &str) -> Result<Resolved<'_>, LessonError> {
        if let Some((category, lesson)) = self.lessons().find(|(_, l)| l.id == lesson_id) {
            tracing::debug!(lesson_id, category = %category.key, "lesson resolved by exact match");
            return Ok(Resolved { lesson, category });
        }

        let Some(prefix) = module_prefix(lesson_id) else {
            tracing::debug!(lesson_id, "lesson not found; identifier has no module prefix");
            return Err(LessonError::not_found(lesson_id));
        };
        let Some(key) = module_category_key(prefix) else {
            tracing::debug!(lesson_id, prefix, "lesson not found; unknown module prefix");
            return Err(LessonError::not_found(lesson_id));
        };

        let found = self.category(&key).and_then(|category| {
            category
                .lessons
                .iter()
                .find(|l| l.id == lesson_id)
                .map(|lesson| (category, lesson))
        });
        match found {
            Some((category, lesson)) => {
                tracing::debug!(lesson_id, category = %key, "lesson resolved by module prefix");
                Ok(Resolved { lesson, category })
            }
            None => {
                tracing::debug!(lesson_id, category = %key, "lesson not found in module category");
                Err(LessonError::not_found(lesson_id))
            }
        }
    }

    /// Convenience form of [`Catalog::resolve`] returning only the lesson.
    pub fn lesson(&self, lesson_id: &str) -> Result<&Lesson, LessonError> {
        self.resolve(lesson_id).map(|r| r.lesson)
    }
}
