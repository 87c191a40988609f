//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/docktree/docktree.toml`
//! 3. Local config: `<search_dir>/.docktree.toml`
//! 4. Environment variables: `DOCKTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for docktree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// File name marking a build context (default: Dockerfile)
    pub dockerfile: String,
    /// Text introducing the parent image inside a Dockerfile (default: "FROM ")
    pub parent_directive: String,
    /// Parent reported for Dockerfiles without directive (default: "?")
    pub unknown_parent: String,
    /// Deepest Dockerfile considered, relative to the search directory
    pub max_depth: Option<usize>,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dockerfile: "Dockerfile".into(),
            parent_directive: "FROM ".into(),
            unknown_parent: "?".into(),
            max_depth: None,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub dockerfile: Option<String>,
    pub parent_directive: Option<String>,
    pub unknown_parent: Option<String>,
    pub max_depth: Option<usize>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for docktree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "docktree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("docktree.toml"))
}

/// Get the path to the local config file in a search directory.
pub fn local_config_path(search_dir: &Path) -> PathBuf {
    search_dir.join(".docktree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            dockerfile: overlay
                .dockerfile
                .clone()
                .unwrap_or_else(|| self.dockerfile.clone()),
            parent_directive: overlay
                .parent_directive
                .clone()
                .unwrap_or_else(|| self.parent_directive.clone()),
            unknown_parent: overlay
                .unknown_parent
                .clone()
                .unwrap_or_else(|| self.unknown_parent.clone()),
            max_depth: overlay.max_depth.or(self.max_depth),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `search_dir` - Optional search directory holding a local `.docktree.toml`
    pub fn load(search_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = search_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply DOCKTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("DOCKTREE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("dockerfile") {
            settings.dockerfile = val;
        }
        if let Ok(val) = config.get_string("parent_directive") {
            settings.parent_directive = val;
        }
        if let Ok(val) = config.get_string("unknown_parent") {
            settings.unknown_parent = val;
        }
        if let Ok(val) = config.get::<usize>("max_depth") {
            settings.max_depth = Some(val);
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.dockerfile.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "dockerfile must not be empty".into(),
            });
        }
        if self.parent_directive.is_empty() {
            return Err(ApplicationError::Config {
                message: "parent_directive must not be empty".into(),
            });
        }
        if self.max_depth.is_some_and(|depth| depth < 2) {
            return Err(ApplicationError::Config {
                message: "max_depth must be at least 2 (contexts live in sub-directories)".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
