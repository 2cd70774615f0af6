//! UX composition layer.
//!
//! This crate drives lessons for a learner (sessions, the reaction-time demo,
//! module overview) and defines the query contract frontends use over a
//! lesson catalog. The catalog itself stays in `uxlearn-kernel`; backends
//! only decide where it comes from.

pub mod config;
pub mod dashboard;
pub mod http;
pub mod reaction;
pub mod session;

pub use config::{ConfigError, UxConfig};
pub use dashboard::{LessonEntry, ModuleCard, module_cards, parse_completed};
pub use reaction::{
    ClickOutcome, ReactionConfig, ReactionError, ReactionSummary, ReactionTrial, TargetSize,
};
pub use session::{Advance, LessonSession, SessionError, SessionView};

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use uxlearn_kernel::{
    Catalog, CatalogError, CategoryMismatch, Lesson, LessonError, Placement, Violation,
};

pub trait CatalogBackend {
    fn catalog(&self) -> &Catalog;
}

#[derive(Debug, Clone)]
pub struct StaticCatalogBackend {
    catalog: Catalog,
    warnings: Vec<Violation>,
}

impl StaticCatalogBackend {
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            warnings: Vec::new(),
        }
    }

    /// The bundled content with its warnings. Empty if the bundle was rejected.
    pub fn builtin() -> Self {
        match Catalog::try_builtin() {
            Ok(loaded) => Self {
                catalog: loaded.catalog.clone(),
                warnings: loaded.warnings.clone(),
            },
            Err(_) => Self::from_catalog(Catalog::default()),
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let loaded = Catalog::load_json(path)?;
        Ok(Self {
            catalog: loaded.catalog,
            warnings: loaded.warnings,
        })
    }

    /// Warning-level findings carried by the loaded content.
    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }
}

impl CatalogBackend for StaticCatalogBackend {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonView {
    pub category: String,
    pub module_number: String,
    #[serde(flatten)]
    pub lesson: Lesson,
}

/// Placements to replay into a fresh exercise, then check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub lesson_id: String,
    pub step: usize,
    /// `(item, category)` pairs applied in order; later moves win.
    pub placements: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckView {
    pub lesson_id: String,
    pub step: usize,
    pub correct: bool,
    pub mismatches: Vec<CategoryMismatch>,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UxQuery {
    Modules { completed: BTreeSet<String> },
    Lesson { lesson_id: String },
    Check(CheckRequest),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UxQueryError {
    #[error("lesson not found: {0}")]
    LessonNotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<LessonError> for UxQueryError {
    fn from(err: LessonError) -> Self {
        match err {
            LessonError::NotFound { lesson_id } => Self::LessonNotFound(lesson_id),
            other => Self::Rejected(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UxService<B: CatalogBackend> {
    backend: B,
}

impl<B: CatalogBackend> UxService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn catalog(&self) -> &Catalog {
        self.backend.catalog()
    }

    pub fn modules(&self, completed: &BTreeSet<String>) -> Vec<ModuleCard> {
        module_cards(self.catalog(), completed)
    }

    pub fn lesson(&self, lesson_id: &str) -> Result<LessonView, LessonError> {
        let resolved = self.catalog().resolve(lesson_id)?;
        Ok(LessonView {
            category: resolved.category.key.clone(),
            module_number: resolved.category.id.clone(),
            lesson: resolved.lesson.clone(),
        })
    }

    pub fn check(&self, request: &CheckRequest) -> Result<CheckView, LessonError> {
        let lesson = self.catalog().lesson(&request.lesson_id)?;
        let example = lesson
            .example(request.step)
            .ok_or_else(|| LessonError::StepOutOfRange {
                lesson_id: lesson.id.clone(),
                index: request.step,
                len: lesson.examples.len(),
            })?;
        let exercise = example
            .as_interactive()
            .ok_or_else(|| LessonError::NotInteractive {
                lesson_id: lesson.id.clone(),
                index: request.step,
            })?;

        let mut placement = Placement::for_exercise(exercise);
        for (item, category) in &request.placements {
            placement.place(item, category)?;
        }
        let correct = placement.check(&exercise.solution)?;
        let report = placement.report(&exercise.solution);
        let feedback = if correct {
            &exercise.feedback.success
        } else {
            &exercise.feedback.failure
        };

        Ok(CheckView {
            lesson_id: lesson.id.clone(),
            step: request.step,
            correct,
            mismatches: report.mismatches,
            feedback: feedback.clone(),
        })
    }

    pub fn query_json(&self, query: UxQuery) -> Result<Value, UxQueryError> {
        match query {
            UxQuery::Modules { completed } => serde_json::to_value(self.modules(&completed))
                .map_err(|e| UxQueryError::Serialization(e.to_string())),
            UxQuery::Lesson { lesson_id } => {
                let view = self.lesson(&lesson_id)?;
                serde_json::to_value(view).map_err(|e| UxQueryError::Serialization(e.to_string()))
            }
            UxQuery::Check(request) => {
                let view = self.check(&request)?;
                serde_json::to_value(view).map_err(|e| UxQueryError::Serialization(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxlearn_kernel::Category;

    #[derive(Clone)]
    struct MockBackend {
        catalog: Catalog,
    }

    impl MockBackend {
        fn new() -> Self {
            let lesson: Lesson = serde_json::from_value(serde_json::json!({
                "id": "3-1",
                "title": "Hick's Law",
                "examples": [
                    {
                        "type": "ux-visual",
                        "principle": "hicks"
                    },
                    {
                        "type": "interactive",
                        "question": "Sorteer",
                        "explanation": "Uitleg",
                        "items": ["PIN", "Contant", "Product toevoegen"],
                        "categories": ["Betalen", "Acties"],
                        "solution": { "Betalen": ["PIN", "Contant"], "Acties": ["Product toevoegen"] },
                        "feedback": { "success": "Goed", "failure": "Fout" }
                    }
                ]
            }))
            .expect("mock lesson should parse");
            Self {
                catalog: Catalog::from_categories(vec![Category {
                    key: "ux-psychology".to_string(),
                    id: "3".to_string(),
                    title: "UX Psychology".to_string(),
                    lessons: vec![lesson],
                }]),
            }
        }
    }

    impl CatalogBackend for MockBackend {
        fn catalog(&self) -> &Catalog {
            &self.catalog
        }
    }

    fn request(step: usize, placements: &[(&str, &str)]) -> CheckRequest {
        CheckRequest {
            lesson_id: "3-1".to_string(),
            step,
            placements: placements
                .iter()
                .map(|(i, c)| (i.to_string(), c.to_string()))
                .collect(),
        }
    }

    #[test]
    fn lesson_view_flattens_lesson_fields() {
        let service = UxService::new(MockBackend::new());
        let value = service
            .query_json(UxQuery::Lesson {
                lesson_id: "3-1".to_string(),
            })
            .expect("lesson query should serialize");
        assert_eq!(value["id"], "3-1");
        assert_eq!(value["category"], "ux-psychology");
        assert_eq!(value["moduleNumber"], "3");
        assert_eq!(value["examples"][1]["type"], "interactive");
    }

    #[test]
    fn check_replays_placements_in_order() {
        let service = UxService::new(MockBackend::new());
        let view = service
            .check(&request(
                1,
                &[
                    ("PIN", "Acties"),
                    ("Contant", "Betalen"),
                    ("Product toevoegen", "Acties"),
                    ("PIN", "Betalen"),
                ],
            ))
            .expect("complete placement should check");
        assert!(view.correct);
        assert_eq!(view.feedback, "Goed");
        assert!(view.mismatches.is_empty());
    }

    #[test]
    fn wrong_check_carries_mismatches_and_failure_feedback() {
        let service = UxService::new(MockBackend::new());
        let view = service
            .check(&request(
                1,
                &[
                    ("PIN", "Betalen"),
                    ("Contant", "Acties"),
                    ("Product toevoegen", "Acties"),
                ],
            ))
            .expect("complete placement should check");
        assert!(!view.correct);
        assert_eq!(view.feedback, "Fout");
        assert_eq!(view.mismatches.len(), 2);
    }

    #[test]
    fn check_errors_map_to_query_errors() {
        let service = UxService::new(MockBackend::new());
        let incomplete = service
            .query_json(UxQuery::Check(request(1, &[("PIN", "Betalen")])))
            .expect_err("incomplete placement should be rejected");
        assert_eq!(
            incomplete,
            UxQueryError::Rejected("finish placing items first (2 unplaced)".to_string())
        );

        let not_interactive = service
            .check(&request(0, &[]))
            .expect_err("visual step has no exercise");
        assert!(matches!(not_interactive, LessonError::NotInteractive { .. }));

        let out_of_range = service
            .check(&request(5, &[]))
            .expect_err("step 5 does not exist");
        assert!(matches!(out_of_range, LessonError::StepOutOfRange { len: 2, .. }));

        let missing = service
            .query_json(UxQuery::Lesson {
                lesson_id: "9-9".to_string(),
            })
            .expect_err("unknown lesson should be not found");
        assert_eq!(missing, UxQueryError::LessonNotFound("9-9".to_string()));
    }

    #[test]
    fn modules_query_counts_completed_lessons() {
        let service = UxService::new(MockBackend::new());
        let value = service
            .query_json(UxQuery::Modules {
                completed: parse_completed("3-1"),
            })
            .expect("modules query should serialize");
        assert_eq!(value[0]["progressPercent"], 100);
    }

    #[test]
    fn builtin_backend_serves_bundled_content() {
        let backend = StaticCatalogBackend::builtin();
        let rules: Vec<&str> = backend.warnings().iter().map(|w| w.rule.as_str()).collect();
        assert_eq!(rules, vec!["lesson_id_format"]);
        let service = UxService::new(backend);
        assert_eq!(service.catalog().categories().len(), 4);
        assert_eq!(
            service.lesson("1-1").expect("1-1 resolves").lesson.title,
            "Introductie tot UX"
        );
    }
}
