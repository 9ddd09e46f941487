//! Path expansion for configuration values.
use std::path::{Component, Path, PathBuf};

/// The invoking user's home directory (`HOME`, then `USERPROFILE`).
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Expand a configured path string into an absolute path.
///
/// - a leading `~` expands to the home directory
/// - relative paths are resolved against `base_dir` (the config file's directory)
/// - `.` and `..` components are folded lexically; nothing is touched on disk
#[must_use]
pub fn expand_path(raw: &str, base_dir: &Path) -> PathBuf {
    expand_path_with_home(raw, base_dir, home_dir().as_deref())
}

pub(super) fn expand_path_with_home(raw: &str, base_dir: &Path, home: Option<&Path>) -> PathBuf {
    let expanded = match (raw.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with(['/', '\\']) => {
            home.join(rest.trim_start_matches(['/', '\\']))
        }
        _ => PathBuf::from(raw),
    };

    if expanded.is_absolute() {
        normalize(&expanded)
    } else {
        normalize(&base_dir.join(expanded))
    }
}

/// Whether `a` and `b` are the same directory or one lies inside the other.
///
/// Compared lexically, and again after resolving symlinks when both paths
/// exist.
#[must_use]
pub fn overlaps(a: &Path, b: &Path) -> bool {
    let nested = |x: &Path, y: &Path| x.starts_with(y) || y.starts_with(x);
    if nested(a, b) {
        return true;
    }
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => nested(&a, &b),
        _ => false,
    }
}

/// Fold `.` and `..` components without consulting the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
