//! Skill synchronisation: resolve skills from source roots and make each
//! enabled target contain exactly those skills.
//!
//! [`resolve`] finds each skill's source directory, [`reconcile`] converges a
//! single target base directory, and [`driver`] ties the two together for a
//! whole configuration. Every step returns its [`SyncStats`]; nothing is
//! counted through shared state.
pub mod driver;
pub mod reconcile;
pub mod resolve;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::logging::Log;
use crate::resources::entry::EntryKind;

/// Shared context for a synchronisation run.
#[derive(Clone)]
pub struct Context {
    /// Logger for output and per-target recording.
    pub log: Arc<dyn Log>,
    /// Whether to preview changes without applying them.
    pub dry_run: bool,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Create a new context.
    #[must_use]
    pub const fn new(log: Arc<dyn Log>, dry_run: bool) -> Self {
        Self { log, dry_run }
    }
}

/// A skill whose source directory was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    /// Leaf directory name, identical in every source root and target.
    pub name: String,
    /// Absolute path of the source directory that won resolution.
    pub source: PathBuf,
}

/// Counters produced by one reconcile (or summed across targets).
///
/// # Examples
///
/// ```
/// use link_skills::sync::SyncStats;
///
/// let mut total = SyncStats { applied: 2, updated: 1, ..SyncStats::default() };
/// total += SyncStats { removed: 3, ..SyncStats::default() };
/// assert_eq!(total.summary(false), "2 applied (1 updated), 3 removed");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    /// Skills copied (added or replaced), or planned to be.
    pub applied: u32,
    /// Subset of `applied` that replaced an existing entry.
    pub updated: u32,
    /// Extraneous entries removed from the base directory.
    pub removed: u32,
    /// Skills skipped because their source vanished.
    pub skipped: u32,
    /// Removals or copies that failed.
    pub failed: u32,
}

impl SyncStats {
    /// Format the summary string (e.g. "3 applied (1 updated), 2 removed").
    ///
    /// # Examples
    ///
    /// ```
    /// use link_skills::sync::SyncStats;
    ///
    /// let stats = SyncStats { applied: 2, skipped: 1, ..SyncStats::default() };
    /// assert_eq!(stats.summary(false), "2 applied, 0 removed, 1 skipped");
    /// assert_eq!(stats.summary(true), "2 would apply, 0 would remove, 1 skipped");
    /// ```
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let (apply, remove) = if dry_run {
            ("would apply", "would remove")
        } else {
            ("applied", "removed")
        };
        let mut out = format!("{} {apply}", self.applied);
        if self.updated > 0 {
            out.push_str(&format!(" ({} updated)", self.updated));
        }
        out.push_str(&format!(", {} {remove}", self.removed));
        if self.skipped > 0 {
            out.push_str(&format!(", {} skipped", self.skipped));
        }
        if self.failed > 0 {
            out.push_str(&format!(", {} failed", self.failed));
        }
        out
    }
}

impl std::ops::AddAssign for SyncStats {
    fn add_assign(&mut self, other: Self) {
        self.applied += other.applied;
        self.updated += other.updated;
        self.removed += other.removed;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// One logical mutation decided by [`reconcile::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create the missing base directory.
    CreateBase,
    /// Remove a child that is not a desired skill.
    Remove {
        /// Child name.
        name: String,
        /// What the child was.
        kind: EntryKind,
    },
    /// Copy a skill into an empty slot.
    Add {
        /// Skill name.
        name: String,
    },
    /// Replace an existing entry with a fresh copy of the skill.
    Update {
        /// Skill name.
        name: String,
        /// What occupied the slot.
        kind: EntryKind,
    },
    /// The skill's source disappeared after resolution.
    SkipMissingSource {
        /// Skill name.
        name: String,
    },
    /// Removing or copying failed.
    Failed {
        /// Entry name.
        name: String,
        /// Error message.
        reason: String,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateBase => write!(f, "create base directory"),
            Self::Remove { name, kind } => write!(f, "remove {kind} {name}"),
            Self::Add { name } => write!(f, "add {name}"),
            Self::Update { name, kind } => write!(f, "update {name} (replacing {kind})"),
            Self::SkipMissingSource { name } => write!(f, "skip {name} (source missing)"),
            Self::Failed { name, reason } => write!(f, "failed {name}: {reason}"),
        }
    }
}

/// Outcome of reconciling one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Counters for this target.
    pub stats: SyncStats,
    /// Mutations performed (or planned, in dry-run mode), in order.
    pub actions: Vec<Action>,
}

impl SyncReport {
    /// Action lines, one per action, for display and snapshots.
    #[must_use]
    pub fn action_lines(&self) -> Vec<String> {
        self.actions.iter().map(ToString::to_string).collect()
    }

    /// Record one action together with its counter delta.
    pub(crate) fn push(&mut self, action: Action, delta: SyncStats) {
        self.actions.push(action);
        self.stats += delta;
    }
}

impl std::ops::AddAssign for SyncReport {
    fn add_assign(&mut self, other: Self) {
        self.stats += other.stats;
        self.actions.extend(other.actions);
    }
}
