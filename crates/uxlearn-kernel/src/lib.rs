//! # uxlearn kernel
//!
//! The logic behind an interactive UX-principles tutorial: which lesson an
//! identifier names, and whether a learner sorted an exercise's items into
//! the right categories.
//!
//! Everything here is a pure, synchronous computation over immutable lesson
//! content. Rendering, routing and session bookkeeping belong to consumers.
//!
//! ## Architecture
//!
//! ```text
//! Catalog               ← categories → lessons → examples, loaded once
//!     │
//! resolve               ← lesson id → Lesson (exact, then module prefix)
//!     │
//! Example               ← scenario | interactive | analysis | visual demos
//!     │
//! Placement             ← Unplaced / PlacedIn(category) per item
//!     │
//! check_solution        ← per-category set equality, no leftovers
//! ```

pub mod catalog;
pub mod error;
pub mod example;
pub mod placement;
pub mod resolve;
pub mod validate;
pub mod wellformed;

pub use catalog::{Catalog, Category, Lesson, LoadedCatalog};
pub use error::{CatalogError, LessonError, Severity, Violation};
pub use example::{
    AnalysisExample, Choice, Comparison, Example, ExampleKind, ExerciseCategory,
    InteractiveExample, Principle, ScenarioExample,
};
pub use placement::{ItemLocation, Placement};
pub use resolve::{Resolved, module_name, module_prefix};
pub use validate::{Assignment, CategoryMismatch, SolutionReport, check_solution, evaluate};
pub use wellformed::check_catalog;
