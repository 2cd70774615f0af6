//! Error types for lesson resolution, exercise validation, and catalog loading.

use serde::{Deserialize, Serialize};

/// Recoverable conditions raised by lesson lookup and exercise handling.
///
/// None of these are fatal: consumers render a fallback state (for example
/// "lesson not found" or "finish placing items first") and carry on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LessonError {
    /// No lesson matches the identifier, directly or via its module prefix.
    #[error("lesson not found: {lesson_id}")]
    NotFound { lesson_id: String },

    /// Validation was requested while items are still in the source pool.
    #[error("finish placing items first ({remaining} unplaced)")]
    IncompleteAssignment { remaining: usize },

    /// A placement event named an item the exercise does not contain.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// A placement event named a category the exercise does not declare.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("step {index} out of range for lesson {lesson_id} ({len} steps)")]
    StepOutOfRange {
        lesson_id: String,
        index: usize,
        len: usize,
    },

    #[error("step {index} of lesson {lesson_id} is not an interactive exercise")]
    NotInteractive { lesson_id: String, index: usize },
}

impl LessonError {
    pub fn not_found(lesson_id: &str) -> Self {
        Self::NotFound {
            lesson_id: lesson_id.to_string(),
        }
    }
}

/// Errors raised while loading lesson content.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse catalog: {0}")]
    Parse(String),

    /// The content parsed but violates at least one error-severity rule.
    #[error("malformed catalog: {}", summarize(.violations))]
    Malformed { violations: Vec<Violation> },
}

fn summarize(violations: &[Violation]) -> String {
    let errors: Vec<&Violation> = violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .collect();
    match errors.first() {
        Some(first) if errors.len() == 1 => first.to_string(),
        Some(first) => format!("{first} (and {} more)", errors.len() - 1),
        None => "no errors".to_string(),
    }
}

/// Severity of a well-formedness violation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// One content-authoring problem found in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule: String,
    pub severity: Severity,
    pub lesson_id: Option<String>,
    pub example_index: Option<usize>,
    pub description: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.rule)?;
        if let Some(lesson_id) = &self.lesson_id {
            write!(f, " lesson {lesson_id}")?;
        }
        if let Some(index) = self.example_index {
            write!(f, " step {index}")?;
        }
        write!(f, ": {}", self.description)
    }
}
