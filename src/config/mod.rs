//! Configuration loading: TOML file -> validated [`Config`] record.
//!
//! The file is deserialized into a loose [`RawConfig`] first so that shape
//! problems (a non-list `skills`, a target without a path, ...) become typed
//! [`ConfigError`]s instead of opaque parse failures. Everything downstream
//! only ever sees a [`Config`].
pub mod paths;
pub mod toml_loader;
pub mod validation;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "skills_config.toml";

/// A destination directory that should contain exactly the resolved skills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Name of the `[targets.<name>]` table.
    pub name: String,
    /// Absolute base directory (one subdirectory per skill).
    pub path: PathBuf,
    /// Disabled targets are skipped entirely, including cleanup.
    pub enabled: bool,
}

impl Target {
    /// Create a target definition.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            enabled,
        }
    }
}

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the configuration file.
    pub path: PathBuf,
    /// Desired skill names, in configuration order.
    pub skills: Vec<String>,
    /// Source roots, highest priority first.
    pub sources: Vec<PathBuf>,
    /// Targets, in configuration order.
    pub targets: Vec<Target>,
}

/// The configuration file as written, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct RawConfig {
    /// Expected to be a non-empty array of strings.
    #[serde(default)]
    pub skills: Option<toml::Value>,
    /// `[sources]` table.
    #[serde(default)]
    pub sources: Option<RawSources>,
    /// `[targets.<name>]` tables, in file order.
    #[serde(default)]
    pub targets: Option<toml::Table>,
}

/// The `[sources]` table.
#[derive(Debug, Default, Deserialize)]
pub struct RawSources {
    /// Source root path strings, highest priority first.
    #[serde(default)]
    pub paths: Vec<String>,
}

/// One `[targets.<name>]` table.
#[derive(Debug, Deserialize)]
struct RawTarget {
    path: Option<String>,
    #[serde(default)]
    enabled: bool,
}

/// Load and validate the configuration file at `path`.
///
/// # Errors
///
/// Returns a loading error if the file is missing, unreadable, or not valid
/// TOML, and a shape error (see [`ConfigError::is_shape_error`]) if it parses
/// but cannot drive a run.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let raw: RawConfig = toml_loader::load_config(path)?;
    let path = dunce::canonicalize(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_raw(raw, path)
}

impl Config {
    /// Validate a raw configuration read from `path` and expand its paths
    /// against the directory containing `path`.
    ///
    /// Checks run in the order a user would fix them: skills, sources,
    /// targets. Disabled targets without a `path` are dropped silently.
    ///
    /// # Errors
    ///
    /// Returns the first shape error found.
    pub fn from_raw(raw: RawConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = path.parent().unwrap_or_else(|| Path::new("/"));
        let skills = parse_skills(raw.skills)?;

        let source_paths = raw.sources.map(|s| s.paths).unwrap_or_default();
        if source_paths.is_empty() {
            return Err(ConfigError::NoSources);
        }
        let sources = source_paths
            .iter()
            .map(|p| paths::expand_path(p, config_dir))
            .collect();

        let tables = raw.targets.unwrap_or_default();
        if tables.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        let mut targets = Vec::with_capacity(tables.len());
        for (name, value) in tables {
            if !value.is_table() {
                return Err(ConfigError::InvalidTarget {
                    name,
                    reason: "expected a table".to_string(),
                });
            }
            let target: RawTarget =
                value
                    .try_into()
                    .map_err(|e: toml::de::Error| ConfigError::InvalidTarget {
                        name: name.clone(),
                        reason: e.message().to_string(),
                    })?;
            match (target.path, target.enabled) {
                (Some(target_path), enabled) => targets.push(Target {
                    path: paths::expand_path(&target_path, config_dir),
                    name,
                    enabled,
                }),
                (None, true) => return Err(ConfigError::TargetWithoutPath(name)),
                (None, false) => {}
            }
        }

        Ok(Self {
            path,
            skills,
            sources,
            targets,
        })
    }

    /// Targets with `enabled = true`, in configuration order.
    pub fn enabled_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.enabled)
    }
}

/// Extract the skill name list, rejecting anything but a non-empty list of
/// plain directory names.
fn parse_skills(value: Option<toml::Value>) -> Result<Vec<String>, ConfigError> {
    let items = match value {
        Some(toml::Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(ConfigError::NoSkills),
    };
    items
        .into_iter()
        .map(|item| match item {
            toml::Value::String(name) if is_plain_name(&name) => Ok(name),
            toml::Value::String(name) => Err(ConfigError::InvalidSkillName(name)),
            _ => Err(ConfigError::SkillsNotStrings),
        })
        .collect()
}

/// A skill name is used as a single path component on both sides.
fn is_plain_name(name: &str) -> bool {
    !name.trim().is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
