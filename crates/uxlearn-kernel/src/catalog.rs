//! The lesson catalog: categories of lessons, each an ordered list of steps.
//!
//! A catalog is built once and never mutated afterwards. Share it by
//! reference (or behind an `Arc`) with whatever needs read access.
//!
//! Authoring format is a JSON object keyed by category key, in display order:
//!
//! ```json
//! { "ux-psychology": { "id": "3", "title": "UX Psychology", "lessons": [ ... ] } }
//! ```

use crate::error::{CatalogError, Severity, Violation};
use crate::example::Example;
use crate::wellformed::check_catalog;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const BUILTIN_CATALOG_JSON: &str = include_str!("../catalog/lessons.json");
const CATALOG_DIGEST_PREFIX: &str = "cat1_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub examples: Vec<Example>,
}

impl Lesson {
    pub fn example(&self, index: usize) -> Option<&Example> {
        self.examples.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Catalog key, e.g. `ux-psychology`. Not part of the authored object.
    #[serde(skip)]
    pub key: String,
    /// Module number as authored, e.g. `"3"`.
    pub id: String,
    pub title: String,
    pub lessons: Vec<Lesson>,
}

/// Immutable, ordered collection of lesson categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

/// A catalog that passed load-time checks, with any warnings it carried.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub warnings: Vec<Violation>,
}

impl Catalog {
    /// Build a catalog without running well-formedness checks.
    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Parse authored JSON and reject it on any error-severity violation.
    pub fn from_json_str(input: &str) -> Result<LoadedCatalog, CatalogError> {
        let root: Map<String, Value> =
            serde_json::from_str(input).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let mut categories = Vec::with_capacity(root.len());
        for (key, value) in root {
            let mut category: Category = serde_json::from_value(value)
                .map_err(|e| CatalogError::Parse(format!("category `{key}`: {e}")))?;
            category.key = key;
            categories.push(category);
        }

        let catalog = Self::from_categories(categories);
        let (errors, warnings): (Vec<Violation>, Vec<Violation>) = check_catalog(&catalog)
            .into_iter()
            .partition(|v| v.severity == Severity::Error);
        if !errors.is_empty() {
            return Err(CatalogError::Malformed {
                violations: errors.into_iter().chain(warnings).collect(),
            });
        }
        for warning in &warnings {
            tracing::warn!(rule = %warning.rule, "{warning}");
        }
        tracing::info!(
            categories = catalog.categories.len(),
            lessons = catalog.lesson_count(),
            "lesson catalog loaded"
        );
        Ok(LoadedCatalog { catalog, warnings })
    }

    /// Load authored JSON from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<LoadedCatalog, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// Load result of the bundled lesson content, warnings included.
    pub fn try_builtin() -> Result<&'static LoadedCatalog, &'static CatalogError> {
        static BUILTIN: OnceLock<Result<LoadedCatalog, CatalogError>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                let loaded = Self::from_json_str(BUILTIN_CATALOG_JSON);
                if let Err(err) = &loaded {
                    tracing::error!("bundled lesson catalog rejected: {err}");
                }
                loaded
            })
            .as_ref()
    }

    /// The bundled lesson content.
    ///
    /// Falls back to an empty catalog, where every lookup is `NotFound`, when
    /// the bundled content is rejected. [`Catalog::try_builtin`] reports why.
    pub fn builtin() -> &'static Catalog {
        static EMPTY: Catalog = Catalog {
            categories: Vec::new(),
        };
        match Self::try_builtin() {
            Ok(loaded) => &loaded.catalog,
            Err(_) => &EMPTY,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// All lessons in catalog order, with the category that holds them.
    pub fn lessons(&self) -> impl Iterator<Item = (&Category, &Lesson)> {
        self.categories
            .iter()
            .flat_map(|c| c.lessons.iter().map(move |l| (c, l)))
    }

    pub fn lesson_count(&self) -> usize {
        self.categories.iter().map(|c| c.lessons.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lesson_count() == 0
    }

    /// Content digest identifying this catalog snapshot.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for category in &self.categories {
            hasher.update(category.key.as_bytes());
            hasher.update([0u8]);
            let bytes = serde_json::to_vec(category).unwrap_or_default();
            hasher.update(&bytes);
            hasher.update([0u8]);
        }
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        format!("{CATALOG_DIGEST_PREFIX}{hex}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads_without_errors() {
        let loaded =
            Catalog::from_json_str(BUILTIN_CATALOG_JSON).expect("bundled catalog should load");
        assert!(loaded.warnings.iter().all(|w| w.severity == Severity::Warning));
        assert_eq!(&loaded.catalog, Catalog::builtin());

        let cached = Catalog::try_builtin().expect("bundled catalog is accepted");
        assert_eq!(cached.catalog, loaded.catalog);
        assert_eq!(cached.warnings, loaded.warnings);
        assert!(std::ptr::eq(&cached.catalog, Catalog::builtin()));
    }

    #[test]
    fn duplicate_id_in_bundled_content_is_rejected() {
        let input = BUILTIN_CATALOG_JSON.replacen("\"id\": \"1-2\"", "\"id\": \"1-1\"", 1);
        match Catalog::from_json_str(&input) {
            Err(CatalogError::Malformed { violations }) => {
                assert!(violations.iter().any(|v| v.rule == "duplicate_lesson_id"));
            }
            other => panic!("expected malformed catalog, got {other:?}"),
        }
    }

    #[test]
    fn builtin_catalog_preserves_authored_order() {
        let keys: Vec<&str> = Catalog::builtin()
            .categories()
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(
            keys,
            vec!["ux-basics", "ux-design", "ux-psychology", "ux-process"]
        );
    }

    #[test]
    fn parse_errors_name_the_category() {
        let err = Catalog::from_json_str(r#"{ "ux-basics": { "id": "1" } }"#)
            .expect_err("missing fields should fail");
        let msg = err.to_string();
        assert!(msg.contains("ux-basics"), "unexpected message: {msg}");
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let builtin = Catalog::builtin();
        assert_eq!(builtin.digest(), builtin.clone().digest());
        assert!(builtin.digest().starts_with("cat1_"));

        let mut categories = builtin.categories().to_vec();
        categories[0].title.push('!');
        let changed = Catalog::from_categories(categories);
        assert_ne!(builtin.digest(), changed.digest());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Catalog::load_json("/definitely/not/here/lessons.json")
            .expect_err("missing file should fail");
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here/lessons.json"));
    }
}
