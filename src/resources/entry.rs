//! Filesystem entry classification and the shared remove/copy operations.
//!
//! Both pruning and replacing a skill go through [`remove_entry`], so the
//! decision of how to delete something is made in exactly one place.
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::ResourceError;

/// What kind of entry occupies a path, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A real directory.
    Directory,
    /// A symbolic link, whether or not its target exists.
    Symlink,
    /// A regular file (or anything else that is neither of the above).
    File,
    /// Nothing is there.
    Missing,
}

impl EntryKind {
    /// Classify the entry at `path`.
    ///
    /// Uses `symlink_metadata`, so a link to a directory is a
    /// [`Symlink`](Self::Symlink) and a dangling link is not
    /// [`Missing`](Self::Missing).
    #[must_use]
    pub fn classify(path: &Path) -> Self {
        match std::fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => Self::Symlink,
            Ok(meta) if meta.is_dir() => Self::Directory,
            Ok(_) => Self::File,
            Err(_) => Self::Missing,
        }
    }

    /// Whether anything occupies the path.
    #[must_use]
    pub const fn exists(self) -> bool {
        !matches!(self, Self::Missing)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::File => "file",
            Self::Missing => "missing",
        };
        f.write_str(s)
    }
}

/// One immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirChild {
    /// File name of the child.
    pub name: OsString,
    /// Full path of the child.
    pub path: PathBuf,
}

/// List the immediate children of `dir`, sorted by name.
///
/// # Errors
///
/// Returns [`ResourceError::ReadDir`] if the directory or one of its entries
/// cannot be read.
pub fn read_children(dir: &Path) -> Result<Vec<DirChild>, ResourceError> {
    let mut children = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| ResourceError::read_dir(dir, e))? {
        let entry = entry.map_err(|e| ResourceError::read_dir(dir, e))?;
        children.push(DirChild {
            name: entry.file_name(),
            path: entry.path(),
        });
    }
    children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(children)
}

/// Remove whatever occupies `path` and return what it was.
///
/// - symlinks are unlinked; the link target is never touched
/// - files are deleted
/// - directories are removed recursively
/// - a missing path is a no-op
///
/// # Errors
///
/// Returns [`ResourceError::Remove`] if the entry exists but cannot be
/// removed.
pub fn remove_entry(path: &Path) -> Result<EntryKind, ResourceError> {
    let kind = EntryKind::classify(path);
    let result = match kind {
        EntryKind::Directory => std::fs::remove_dir_all(path),
        EntryKind::Symlink => remove_symlink(path),
        EntryKind::File => std::fs::remove_file(path),
        EntryKind::Missing => Ok(()),
    };
    result.map_err(|e| ResourceError::remove(path, e))?;
    Ok(kind)
}

/// Directory symlinks on Windows are removed with `remove_dir`.
fn remove_symlink(path: &Path) -> std::io::Result<()> {
    std::fs::remove_file(path).or_else(|e| {
        if cfg!(windows) {
            std::fs::remove_dir(path)
        } else {
            Err(e)
        }
    })
}

/// Recursively copy a directory tree.
///
/// Symlinks within the source tree are *followed*: [`Path::is_dir`] follows
/// links, so directory symlinks are recursed into and file symlinks are
/// copied as regular files. The result contains no links.
///
/// # Errors
///
/// Returns an error if a destination directory cannot be created, a source
/// directory cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), ResourceError> {
    std::fs::create_dir_all(dst).map_err(|e| ResourceError::create_dir(dst, e))?;
    for child in read_children(src)? {
        let dst_path = dst.join(&child.name);
        if child.path.is_dir() {
            copy_dir_recursive(&child.path, &dst_path)?;
        } else {
            std::fs::copy(&child.path, &dst_path).map_err(|source| ResourceError::Copy {
                from: child.path.clone(),
                to: dst_path.clone(),
                source,
            })?;
        }
    }
    Ok(())
}
