//! Load-time well-formedness rules for lesson content.
//!
//! Errors make a catalog unusable (an exercise that can never be solved, or a
//! lesson id that resolves ambiguously). Warnings flag content that still
//! works but breaks authoring conventions.

use crate::catalog::Catalog;
use crate::error::{Severity, Violation};
use crate::example::{Example, InteractiveExample};
use crate::resolve::module_prefix;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

pub mod rule {
    pub const DUPLICATE_LESSON_ID: &str = "duplicate_lesson_id";
    pub const DUPLICATE_ITEM: &str = "duplicate_item";
    pub const DUPLICATE_CATEGORY: &str = "duplicate_category";
    pub const UNDECLARED_SOLUTION_CATEGORY: &str = "undeclared_solution_category";
    pub const ITEM_NOT_IN_SOLUTION: &str = "item_not_in_solution";
    pub const ITEM_IN_MULTIPLE_CATEGORIES: &str = "item_in_multiple_categories";
    pub const SOLUTION_ITEM_NOT_LISTED: &str = "solution_item_not_listed";
    pub const LESSON_ID_FORMAT: &str = "lesson_id_format";
    pub const LESSON_MODULE_MISMATCH: &str = "lesson_module_mismatch";
    pub const EMPTY_LESSON: &str = "empty_lesson";
}

fn lesson_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+-\d+$").expect("static lesson id pattern"))
}

struct Findings {
    violations: Vec<Violation>,
}

impl Findings {
    fn push(
        &mut self,
        rule: &str,
        severity: Severity,
        lesson_id: &str,
        example_index: Option<usize>,
        description: String,
    ) {
        self.violations.push(Violation {
            rule: rule.to_string(),
            severity,
            lesson_id: Some(lesson_id.to_string()),
            example_index,
            description,
        });
    }
}

/// Check every lesson and interactive exercise in `catalog`.
///
/// Violations are returned in catalog order; an empty vector means the
/// content is clean.
pub fn check_catalog(catalog: &Catalog) -> Vec<Violation> {
    let mut findings = Findings {
        violations: Vec::new(),
    };
    let mut first_seen: BTreeMap<&str, &str> = BTreeMap::new();

    for (category, lesson) in catalog.lessons() {
        let id = lesson.id.as_str();

        if let Some(previous) = first_seen.insert(id, category.key.as_str()) {
            findings.push(
                rule::DUPLICATE_LESSON_ID,
                Severity::Error,
                id,
                None,
                format!(
                    "lesson id also used in `{previous}`; only the first is reachable"
                ),
            );
            first_seen.insert(id, previous);
        }

        if !lesson_id_pattern().is_match(id) {
            findings.push(
                rule::LESSON_ID_FORMAT,
                Severity::Warning,
                id,
                None,
                "lesson id does not follow `<module>-<lesson>`".to_string(),
            );
        }

        if let Some(prefix) = module_prefix(id)
            && prefix != category.id
        {
            findings.push(
                rule::LESSON_MODULE_MISMATCH,
                Severity::Warning,
                id,
                None,
                format!(
                    "module prefix `{prefix}` differs from category `{}` (id {})",
                    category.key, category.id
                ),
            );
        }

        if lesson.examples.is_empty() {
            findings.push(
                rule::EMPTY_LESSON,
                Severity::Warning,
                id,
                None,
                "lesson has no steps".to_string(),
            );
        }

        for (index, example) in lesson.examples.iter().enumerate() {
            if let Example::Interactive(exercise) = example {
                check_exercise(&mut findings, id, index, exercise);
            }
        }
    }

    findings.violations
}

fn check_exercise(
    findings: &mut Findings,
    lesson_id: &str,
    index: usize,
    exercise: &InteractiveExample,
) {
    let mut items: BTreeSet<&str> = BTreeSet::new();
    for item in &exercise.items {
        if !items.insert(item.as_str()) {
            findings.push(
                rule::DUPLICATE_ITEM,
                Severity::Error,
                lesson_id,
                Some(index),
                format!("item `{item}` listed more than once"),
            );
        }
    }

    let mut declared: BTreeSet<&str> = BTreeSet::new();
    for name in exercise.category_names() {
        if !declared.insert(name) {
            findings.push(
                rule::DUPLICATE_CATEGORY,
                Severity::Error,
                lesson_id,
                Some(index),
                format!("category `{name}` declared more than once"),
            );
        }
    }

    let mut homes: BTreeMap<&str, &str> = BTreeMap::new();
    for (category, expected) in &exercise.solution {
        if !declared.contains(category.as_str()) {
            findings.push(
                rule::UNDECLARED_SOLUTION_CATEGORY,
                Severity::Error,
                lesson_id,
                Some(index),
                format!("solution uses undeclared category `{category}`"),
            );
        }
        for item in expected {
            if !items.contains(item.as_str()) {
                findings.push(
                    rule::SOLUTION_ITEM_NOT_LISTED,
                    Severity::Error,
                    lesson_id,
                    Some(index),
                    format!("solution item `{item}` is not in the item list"),
                );
            }
            if let Some(other) = homes.insert(item.as_str(), category.as_str()) {
                findings.push(
                    rule::ITEM_IN_MULTIPLE_CATEGORIES,
                    Severity::Error,
                    lesson_id,
                    Some(index),
                    format!("item `{item}` expected in both `{other}` and `{category}`"),
                );
            }
        }
    }

    for item in &items {
        if !homes.contains_key(item) {
            findings.push(
                rule::ITEM_NOT_IN_SOLUTION,
                Severity::Error,
                lesson_id,
                Some(index),
                format!("item `{item}` has no category in the solution"),
            );
        }
    }
}
