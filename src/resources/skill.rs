//! One skill copied into one target directory.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::entry::{self, EntryKind};
use super::{Resource, ResourceChange, ResourceState};
use crate::sync::Skill;

/// A skill directory copied from its source into a target base directory.
///
/// There is no content comparison: an existing target is always reported
/// as [`ResourceState::Incorrect`] and fully replaced on apply.
#[derive(Debug, Clone)]
pub struct SkillResource {
    /// Skill name (leaf directory name on both sides).
    pub name: String,
    /// Resolved source directory.
    pub source: PathBuf,
    /// Destination directory, `<base>/<name>`.
    pub target: PathBuf,
}

impl SkillResource {
    /// Create a new skill resource.
    #[must_use]
    pub const fn new(name: String, source: PathBuf, target: PathBuf) -> Self {
        Self {
            name,
            source,
            target,
        }
    }

    /// Create from a resolved skill and the target's base directory.
    #[must_use]
    pub fn from_skill(skill: &Skill, base: &Path) -> Self {
        Self::new(
            skill.name.clone(),
            skill.source.clone(),
            base.join(&skill.name),
        )
    }

    /// What currently occupies the target path.
    #[must_use]
    pub fn target_kind(&self) -> EntryKind {
        EntryKind::classify(&self.target)
    }
}

impl Resource for SkillResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.name, self.target.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: format!("source {} does not exist", self.source.display()),
            });
        }
        Ok(match self.target_kind() {
            EntryKind::Missing => ResourceState::Missing,
            kind => ResourceState::Incorrect {
                current: kind.to_string(),
            },
        })
    }

    fn apply(&self) -> Result<ResourceChange> {
        entry::remove_entry(&self.target)?;
        if let Err(e) = entry::copy_dir_recursive(&self.source, &self.target) {
            entry::remove_entry(&self.target).ok(); // Cleanup partial copy (best effort)
            return Err(e.into());
        }
        Ok(ResourceChange::Applied)
    }
}
