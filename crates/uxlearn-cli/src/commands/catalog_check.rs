use crate::support::{Context, print_json_or_exit, yes_no};
use serde::Serialize;
use std::process;
use uxlearn_kernel::{Catalog, CatalogError, Severity, Violation};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogCheckReport {
    catalog: String,
    accepted: bool,
    digest: Option<String>,
    categories: usize,
    lessons: usize,
    errors: usize,
    warnings: usize,
    violations: Vec<Violation>,
}

impl CatalogCheckReport {
    fn new(label: String, catalog: Option<&Catalog>, violations: Vec<Violation>) -> Self {
        let errors = violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count();
        Self {
            catalog: label,
            accepted: errors == 0,
            digest: catalog.map(Catalog::digest),
            categories: catalog.map_or(0, |c| c.categories().len()),
            lessons: catalog.map_or(0, Catalog::lesson_count),
            errors,
            warnings: violations.len() - errors,
            violations,
        }
    }
}

pub fn run(ctx: &Context, json: bool) {
    let label = ctx.catalog_label();
    let report = match &ctx.catalog_path {
        None => match Catalog::try_builtin() {
            Ok(loaded) => {
                CatalogCheckReport::new(label, Some(&loaded.catalog), loaded.warnings.clone())
            }
            Err(CatalogError::Malformed { violations }) => {
                CatalogCheckReport::new(label, None, violations.clone())
            }
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        },
        Some(path) => match Catalog::load_json(path) {
            Ok(loaded) => CatalogCheckReport::new(label, Some(&loaded.catalog), loaded.warnings),
            Err(CatalogError::Malformed { violations }) => {
                CatalogCheckReport::new(label, None, violations)
            }
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        },
    };

    if json {
        print_json_or_exit(&report);
    } else {
        println!("uxlearn catalog-check");
        println!("  catalog: {}", report.catalog);
        println!("  accepted: {}", yes_no(report.accepted));
        if let Some(digest) = &report.digest {
            println!("  digest: {digest}");
            println!(
                "  contents: {} categories, {} lessons",
                report.categories, report.lessons
            );
        }
        println!("  errors: {}", report.errors);
        println!("  warnings: {}", report.warnings);
        for violation in &report.violations {
            let tag = match violation.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            println!("    - {tag} {violation}");
        }
    }

    if !report.accepted {
        process::exit(1);
    }
}
