//! Solution checking for drag-and-drop sorting exercises.
//!
//! A placement is correct when every category of the expected solution holds
//! exactly its expected items (order irrelevant) and no other category holds
//! anything. Validation is inhibited while items remain unplaced.

use crate::error::LessonError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Category name → item labels.
pub type Assignment = BTreeMap<String, Vec<String>>;

/// One category whose contents differ from the solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMismatch {
    pub category: String,
    /// Expected here but placed elsewhere (or nowhere).
    pub missing: Vec<String>,
    /// Placed here but not expected here. Repeated labels appear once per
    /// surplus copy.
    pub unexpected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionReport {
    pub correct: bool,
    pub mismatches: Vec<CategoryMismatch>,
}

/// Compare an assignment to the expected solution, category by category.
///
/// Categories are reported in name order: expected categories first, then
/// any unsanctioned category that holds items.
pub fn evaluate(assignment: &Assignment, expected: &Assignment) -> SolutionReport {
    let mut mismatches = Vec::new();

    for (category, expected_items) in expected {
        let placed = assignment.get(category).map(Vec::as_slice).unwrap_or(&[]);
        if let Some(mismatch) = compare_bucket(category, placed, expected_items) {
            mismatches.push(mismatch);
        }
    }

    for (category, placed) in assignment {
        if expected.contains_key(category) || placed.is_empty() {
            continue;
        }
        mismatches.push(CategoryMismatch {
            category: category.clone(),
            missing: Vec::new(),
            unexpected: placed.clone(),
        });
    }

    SolutionReport {
        correct: mismatches.is_empty(),
        mismatches,
    }
}

fn compare_bucket(category: &str, placed: &[String], expected: &[String]) -> Option<CategoryMismatch> {
    let expected_set: BTreeSet<&str> = expected.iter().map(String::as_str).collect();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    let mut unexpected = Vec::new();
    for item in placed {
        // A second copy of an expected label is still one too many.
        if !expected_set.contains(item.as_str()) || !seen.insert(item.as_str()) {
            unexpected.push(item.clone());
        }
    }
    let missing: Vec<String> = expected_set
        .iter()
        .filter(|item| !seen.contains(*item))
        .map(|item| item.to_string())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        None
    } else {
        Some(CategoryMismatch {
            category: category.to_string(),
            missing,
            unexpected,
        })
    }
}

/// Pass/fail check of an assignment against the expected solution.
///
/// Returns [`LessonError::IncompleteAssignment`] while `unassigned_count` is
/// non-zero, regardless of how the placed items are distributed.
pub fn check_solution(
    assignment: &Assignment,
    expected: &Assignment,
    unassigned_count: usize,
) -> Result<bool, LessonError> {
    if unassigned_count > 0 {
        return Err(LessonError::IncompleteAssignment {
            remaining: unassigned_count,
        });
    }
    Ok(evaluate(assignment, expected).correct)
}
