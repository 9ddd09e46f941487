//! Typed error variants for filesystem resource operations.
//!
//! Every variant carries the path it failed on and the underlying
//! [`std::io::Error`]; callers convert to [`anyhow::Error`] via `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from checking and applying filesystem resources.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A directory (and its ancestors) could not be created.
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A directory listing could not be read.
    #[error("cannot read directory {}: {source}", .path.display())]
    ReadDir {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An existing entry could not be removed.
    #[error("cannot remove {}: {source}", .path.display())]
    Remove {
        /// Entry that could not be removed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A file could not be copied.
    #[error("cannot copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        /// Source file.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ResourceError {
    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn remove(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Remove {
            path: path.into(),
            source,
        }
    }
}
