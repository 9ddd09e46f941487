//! Non-fatal configuration checks.
//!
//! Shape errors are rejected by [`Config::from_raw`](super::Config::from_raw);
//! the checks here flag configurations that are valid but probably not what
//! the user meant.
use std::collections::HashSet;

use super::{Config, paths};

/// A validation warning detected after loading the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning about `item`.
    #[must_use]
    pub fn new(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Check the configuration for suspicious but legal settings.
///
/// - a skill listed more than once (only the first occurrence is used)
/// - a source root that does not exist
/// - an enabled target that overlaps a source root (the run refuses to
///   sync it)
#[must_use]
pub fn validate(config: &Config) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    for name in &config.skills {
        if !seen.insert(name.as_str()) {
            warnings.push(ValidationWarning::new(
                name,
                "skill listed more than once; later entries are ignored",
            ));
        }
    }

    for source in &config.sources {
        if !source.is_dir() {
            warnings.push(ValidationWarning::new(
                source.display().to_string(),
                "source directory does not exist",
            ));
        }
    }

    for target in config.targets.iter().filter(|t| t.enabled) {
        for source in &config.sources {
            if paths::overlaps(&target.path, source) {
                warnings.push(ValidationWarning::new(
                    &target.name,
                    format!(
                        "target directory {} overlaps source {}; it will not be synced",
                        target.path.display(),
                        source.display()
                    ),
                ));
            }
        }
    }

    warnings
}
