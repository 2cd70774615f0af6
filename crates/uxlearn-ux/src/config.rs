//! TOML configuration for the CLI and HTTP surface.
//!
//! Every section is optional; a missing file at the default location means
//! all defaults.

use crate::reaction::ReactionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "uxlearn.toml";
pub const DEFAULT_BIND: &str = "127.0.0.1:43180";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UxConfig {
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
    pub reaction: ReactionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Lesson content to load instead of the bundled catalog.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl UxConfig {
    pub fn from_toml_str(input: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file that must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text, &path.display().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.reaction.clicks_per_target == 0 {
            return Err(ConfigError::Invalid(
                "reaction.clicks_per_target must be at least 1".to_string(),
            ));
        }
        if self.reaction.small_target_px >= self.reaction.large_target_px {
            return Err(ConfigError::Invalid(format!(
                "reaction.small_target_px ({}) must be smaller than reaction.large_target_px ({})",
                self.reaction.small_target_px, self.reaction.large_target_px
            )));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.bind.parse().map_err(|e| {
            ConfigError::Invalid(format!("server.bind `{}`: {e}", self.server.bind))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = UxConfig::from_toml_str("", "inline").expect("empty config parses");
        assert_eq!(config, UxConfig::default());
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.reaction.clicks_per_target, 5);
        assert_eq!(config.log.level, "warn");
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = UxConfig::from_toml_str(
            r#"
            [catalog]
            path = "content/lessons.json"

            [reaction]
            clicks_per_target = 3
            "#,
            "inline",
        )
        .expect("partial config parses");
        assert_eq!(
            config.catalog.path.as_deref(),
            Some(Path::new("content/lessons.json"))
        );
        assert_eq!(config.reaction.clicks_per_target, 3);
        assert_eq!(config.reaction.large_target_px, 80);
        assert_eq!(config.server.bind, DEFAULT_BIND);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = UxConfig::from_toml_str("[server]\nbind = \"nowhere\"", "inline")
            .expect_err("bad bind should fail");
        assert!(err.to_string().contains("server.bind"));

        let err = UxConfig::from_toml_str(
            "[reaction]\nsmall_target_px = 90\nlarge_target_px = 80",
            "inline",
        )
        .expect_err("inverted targets should fail");
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = UxConfig::from_toml_str("[log]\nlevel = 3", "inline")
            .expect_err("wrong type should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_default_file_means_defaults() {
        let config = UxConfig::load_or_default("/definitely/not/here/uxlearn.toml")
            .expect("missing file falls back");
        assert_eq!(config, UxConfig::default());
        assert!(matches!(
            UxConfig::load("/definitely/not/here/uxlearn.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
