//! Converge one target base directory to exactly the desired skills.
//!
//! Phases run strictly in order: ensure the base exists, prune children that
//! are not desired, then copy every desired skill (replacing whatever is
//! already there). Each phase returns its own [`SyncReport`]; [`reconcile`]
//! only sums them.
use anyhow::{Context as _, Result};
use std::collections::HashSet;
use std::path::Path;

use super::{Action, Context, Skill, SyncReport, SyncStats};
use crate::resources::entry::{self, EntryKind};
use crate::resources::error::ResourceError;
use crate::resources::extraneous::ExtraneousEntry;
use crate::resources::skill::SkillResource;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Make `base` contain exactly one copy of each skill in `desired`.
///
/// In dry-run mode nothing on disk changes, but the returned report holds the
/// same actions and counters a real run would produce.
///
/// Per-entry failures are reported, counted as `failed`, and do not stop the
/// run.
///
/// # Errors
///
/// Returns an error only if the target is unusable: the base directory cannot
/// be created, is not a directory, or cannot be listed.
pub fn reconcile(ctx: &Context, base: &Path, desired: &[Skill]) -> Result<SyncReport> {
    let (mut report, base_exists) = ensure_base(ctx, base)?;
    if base_exists {
        report += prune(ctx, base, desired)?;
    }
    report += converge(ctx, base, desired);
    Ok(report)
}

/// Phase 1: create the base directory if it is missing.
///
/// Returns whether the base exists on disk afterwards (always `false` for a
/// previewed creation).
fn ensure_base(ctx: &Context, base: &Path) -> Result<(SyncReport, bool)> {
    let mut report = SyncReport::default();
    match EntryKind::classify(base) {
        EntryKind::Missing => {}
        _ if base.is_dir() => return Ok((report, true)),
        kind => anyhow::bail!("{} exists but is a {kind}, not a directory", base.display()),
    }

    if ctx.dry_run {
        ctx.log
            .dry_run(&format!("would create directory {}", base.display()));
        report.push(Action::CreateBase, SyncStats::default());
        return Ok((report, false));
    }

    std::fs::create_dir_all(base)
        .map_err(|e| ResourceError::create_dir(base, e))
        .context("preparing target")?;
    ctx.log.info(&format!("created directory {}", base.display()));
    report.push(Action::CreateBase, SyncStats::default());
    Ok((report, true))
}

/// Phase 2: remove every child of `base` that is not a desired skill.
fn prune(ctx: &Context, base: &Path, desired: &[Skill]) -> Result<SyncReport> {
    let wanted: HashSet<&str> = desired.iter().map(|s| s.name.as_str()).collect();
    let mut report = SyncReport::default();

    for child in entry::read_children(base).context("listing target")? {
        if child
            .name
            .to_str()
            .is_some_and(|name| wanted.contains(name))
        {
            continue;
        }
        let resource = ExtraneousEntry::new(child.name.to_string_lossy().into_owned(), child.path);
        let desc = resource.description();
        if matches!(resource.needs_change(), Ok(false)) {
            ctx.log.debug(&format!("already gone: {desc}"));
            continue;
        }
        let kind = resource.kind();
        let removed = SyncStats {
            removed: 1,
            ..SyncStats::default()
        };

        if ctx.dry_run {
            ctx.log.dry_run(&format!("would remove {kind} {desc}"));
            report.push(
                Action::Remove {
                    name: resource.name,
                    kind,
                },
                removed,
            );
            continue;
        }

        match resource.apply() {
            Ok(ResourceChange::Applied) => {
                ctx.log.info(&format!("removed {kind} {desc}"));
                report.push(
                    Action::Remove {
                        name: resource.name,
                        kind,
                    },
                    removed,
                );
            }
            Ok(ResourceChange::AlreadyCorrect) => {
                ctx.log.debug(&format!("already gone: {desc}"));
            }
            Err(e) => {
                ctx.log.warn(&format!("failed to remove {desc}: {e:#}"));
                report.push(
                    Action::Failed {
                        name: resource.name,
                        reason: format!("{e:#}"),
                    },
                    failed(),
                );
            }
        }
    }
    Ok(report)
}

/// Phase 3: copy each desired skill into `base`, replacing what is there.
fn converge(ctx: &Context, base: &Path, desired: &[Skill]) -> SyncReport {
    let mut report = SyncReport::default();

    for skill in desired {
        let resource = SkillResource::from_skill(skill, base);
        let desc = resource.description();

        let (action, delta, (verb, done)) = match resource.current_state() {
            Ok(ResourceState::Invalid { reason }) => {
                ctx.log.warn(&format!("skipping {}: {reason}", skill.name));
                report.push(
                    Action::SkipMissingSource {
                        name: skill.name.clone(),
                    },
                    SyncStats {
                        skipped: 1,
                        ..SyncStats::default()
                    },
                );
                continue;
            }
            Ok(ResourceState::Missing) => (
                Action::Add {
                    name: skill.name.clone(),
                },
                SyncStats {
                    applied: 1,
                    ..SyncStats::default()
                },
                ("add", "added"),
            ),
            // Existing entries are always replaced.
            Ok(ResourceState::Correct | ResourceState::Incorrect { .. }) => (
                Action::Update {
                    name: skill.name.clone(),
                    kind: resource.target_kind(),
                },
                SyncStats {
                    applied: 1,
                    updated: 1,
                    ..SyncStats::default()
                },
                ("update", "updated"),
            ),
            Err(e) => {
                ctx.log.warn(&format!("failed to check {desc}: {e:#}"));
                report.push(
                    Action::Failed {
                        name: skill.name.clone(),
                        reason: format!("{e:#}"),
                    },
                    failed(),
                );
                continue;
            }
        };

        if ctx.dry_run {
            ctx.log.dry_run(&format!("would {verb} {desc}"));
            report.push(action, delta);
            continue;
        }

        match resource.apply() {
            Ok(_) => {
                ctx.log.info(&format!("{done} {desc}"));
                report.push(action, delta);
            }
            Err(e) => {
                ctx.log.warn(&format!("failed to copy {desc}: {e:#}"));
                report.push(
                    Action::Failed {
                        name: skill.name.clone(),
                        reason: format!("{e:#}"),
                    },
                    failed(),
                );
            }
        }
    }
    report
}

const fn failed() -> SyncStats {
    SyncStats {
        applied: 0,
        updated: 0,
        removed: 0,
        skipped: 0,
        failed: 1,
    }
}
