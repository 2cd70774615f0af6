use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use uxlearn_kernel::{Catalog, Example};
use uxlearn_ux::config::DEFAULT_CONFIG_PATH;
use uxlearn_ux::{StaticCatalogBackend, UxConfig, UxService};

/// Settings shared by every command after global flags are applied.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: UxConfig,
    pub catalog_path: Option<PathBuf>,
}

impl Context {
    pub fn catalog_label(&self) -> String {
        match &self.catalog_path {
            Some(path) => path.display().to_string(),
            None => "builtin".to_string(),
        }
    }
}

pub fn load_config_or_exit(path: Option<&str>) -> UxConfig {
    let loaded = match path {
        Some(path) => UxConfig::load(path),
        None => UxConfig::load_or_default(DEFAULT_CONFIG_PATH),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    })
}

pub fn load_backend_or_exit(catalog_path: Option<&Path>) -> StaticCatalogBackend {
    match catalog_path {
        Some(path) => StaticCatalogBackend::load_json(path).unwrap_or_else(|e| {
            eprintln!("error: failed to load lesson catalog at {}: {e}", path.display());
            process::exit(1);
        }),
        None => {
            if let Err(e) = Catalog::try_builtin() {
                eprintln!("error: bundled lesson catalog rejected: {e}");
                process::exit(1);
            }
            StaticCatalogBackend::builtin()
        }
    }
}

pub fn load_service_or_exit(ctx: &Context) -> UxService<StaticCatalogBackend> {
    UxService::new(load_backend_or_exit(ctx.catalog_path.as_deref()))
}

pub fn print_json_or_exit<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: failed to render JSON: {e}");
            process::exit(1);
        }
    }
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}

/// One-line headline for a lesson step.
pub fn describe_step(example: &Example) -> String {
    match example {
        Example::Scenario(s) => s.question.clone(),
        Example::Interactive(i) => format!(
            "{} [{} items -> {}]",
            i.question,
            i.items.len(),
            i.category_names().collect::<Vec<_>>().join(", ")
        ),
        Example::Analysis(a) => format!("{}: {}", a.case_study.title, a.question),
        Example::Layout(c) => format!("{} vs {}", c.bad.title, c.good.title),
        Example::Contrast(c) => format!("{} vs {}", c.bad.title, c.good.title),
        Example::Buttons(c) => format!("{} vs {}", c.bad.title, c.good.title),
        Example::Fitts(c) => format!("{} vs {}", c.bad.title, c.good.title),
        Example::Hicks(c) => format!(
            "{} ({} options) vs {} ({} options)",
            c.bad.title, c.bad.options, c.good.title, c.good.options
        ),
        Example::UxVisual(v) => format!("walkthrough: {}", v.principle.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_headlines_cover_builtin_lesson() {
        let lesson = Catalog::builtin().lesson("3-1").expect("3-1 resolves");
        let lines: Vec<String> = lesson.examples.iter().map(describe_step).collect();
        insta::assert_snapshot!(lines.join("\n"), @r"
        In een noodsituatie, welk startscherm zou snellere actie mogelijk maken?
        Groepeer de knoppen van een zelfscan-kassa. [3 items -> Betalen, Acties]
        Volledig menu (24 options) vs Gegroepeerd menu (5 options)
        Checkout van een webshop: Waarom presteert versie B beter?
        ");
    }
}
