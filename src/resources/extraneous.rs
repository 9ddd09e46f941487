//! Removal of target children that are not desired skills.
use anyhow::Result;
use std::path::PathBuf;

use super::entry::{self, EntryKind};
use super::{Resource, ResourceChange, ResourceState};

/// A child of a target base directory that is not a desired skill.
///
/// The desired state is absence: the resource is [`ResourceState::Correct`]
/// once nothing occupies the path.
#[derive(Debug, Clone)]
pub struct ExtraneousEntry {
    /// Child name, as shown to the user.
    pub name: String,
    /// Full path of the child.
    pub path: PathBuf,
}

impl ExtraneousEntry {
    /// Create a new extraneous entry.
    #[must_use]
    pub const fn new(name: String, path: PathBuf) -> Self {
        Self { name, path }
    }

    /// What currently occupies the path.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        EntryKind::classify(&self.path)
    }
}

impl Resource for ExtraneousEntry {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(match self.kind() {
            EntryKind::Missing => ResourceState::Correct,
            kind => ResourceState::Incorrect {
                current: kind.to_string(),
            },
        })
    }

    fn apply(&self) -> Result<ResourceChange> {
        Ok(match entry::remove_entry(&self.path)? {
            EntryKind::Missing => ResourceChange::AlreadyCorrect,
            _ => ResourceChange::Applied,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry_at(path: PathBuf) -> ExtraneousEntry {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ExtraneousEntry::new(name, path)
    }

    #[test]
    fn present_entry_needs_removal() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old");
        std::fs::create_dir(&old).unwrap();
        let resource = entry_at(old);
        assert_eq!(
            resource.current_state().unwrap(),
            ResourceState::Incorrect {
                current: "directory".to_string()
            }
        );
        assert!(resource.needs_change().unwrap());
    }

    #[test]
    fn apply_removes_entry() {
        let dir = tempfile::tempdir().unwrap();
        let stray = dir.path().join("stray.txt");
        std::fs::write(&stray, "x").unwrap();

        let resource = entry_at(stray.clone());
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert!(!stray.exists());
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn vanished_entry_needs_no_change() {
        let dir = tempfile::tempdir().unwrap();
        let resource = entry_at(dir.path().join("gone"));
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
        assert!(!resource.needs_change().unwrap());
    }

    #[test]
    fn apply_on_vanished_entry_is_already_correct() {
        let dir = tempfile::tempdir().unwrap();
        let resource = entry_at(dir.path().join("gone"));
        assert_eq!(resource.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }
}
