//! Domain-specific error types for configuration handling.
//!
//! Loading errors ([`ConfigError::NotFound`], [`ConfigError::Io`],
//! [`ConfigError::Parse`]) end the process. Shape errors describe a
//! configuration that parsed but cannot drive a run; the command reports them
//! as warnings and exits without touching any target.
//!
//! Resource-level failures live in [`crate::resources::error`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from loading and validating the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("config file not found: {}", .path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML (or has mistyped fields).
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// `skills` is missing or empty.
    #[error("no skills defined in config")]
    NoSkills,

    /// `skills` contains a non-string element.
    #[error("skills must be a list of strings, e.g. skills = [\"skill1\", \"skill2\"]")]
    SkillsNotStrings,

    /// A skill name is empty or not a single path component.
    #[error("invalid skill name '{0}': must be a plain directory name")]
    InvalidSkillName(String),

    /// `sources.paths` is missing or empty.
    #[error("no sources.paths defined in config")]
    NoSources,

    /// `targets` is missing or empty.
    #[error("no targets defined in config")]
    NoTargets,

    /// An enabled target has no `path`.
    #[error("target '{0}' is enabled but has no path")]
    TargetWithoutPath(String),

    /// A target entry has the wrong shape.
    #[error("target '{name}' is invalid: {reason}")]
    InvalidTarget {
        /// Target name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    /// Whether this error describes a configuration that parsed but has an
    /// unusable shape (reported as a warning, not a failure).
    #[must_use]
    pub const fn is_shape_error(&self) -> bool {
        !matches!(
            self,
            Self::NotFound { .. } | Self::Io { .. } | Self::Parse { .. }
        )
    }
}
