//! Run a whole configuration: resolve skills once, then reconcile every
//! enabled target in order.
use anyhow::{Result, anyhow};
use std::path::PathBuf;

use super::reconcile::reconcile;
use super::resolve::resolve_all;
use super::{Context, SyncReport, SyncStats};
use crate::config::{Config, paths};
use crate::logging::TargetStatus;

/// Result of reconciling one target.
#[derive(Debug)]
pub struct TargetReport {
    /// Target name.
    pub name: String,
    /// Target base directory.
    pub path: PathBuf,
    /// Report, or the error that made the target unusable.
    pub result: Result<SyncReport>,
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The configuration lists no skills.
    NoSkills,
    /// None of the listed skills exists in any source root.
    NothingResolved,
    /// Every target is disabled.
    NoEnabledTargets,
    /// Every enabled target was processed.
    Completed {
        /// One report per enabled target, in configuration order.
        targets: Vec<TargetReport>,
        /// Sum of the stats of every target that did not fail.
        totals: SyncStats,
    },
}

impl RunOutcome {
    /// Number of targets that could not be reconciled.
    #[must_use]
    pub fn failed_targets(&self) -> usize {
        match self {
            Self::Completed { targets, .. } => targets.iter().filter(|t| t.result.is_err()).count(),
            _ => 0,
        }
    }
}

/// Resolve the configured skills and reconcile each enabled target.
///
/// Nothing on disk is touched unless at least one skill resolves and at
/// least one target is enabled. A target that overlaps a source root fails
/// without being touched. A failing target is logged and recorded but does
/// not stop the targets after it.
#[must_use]
pub fn run(config: &Config, ctx: &Context) -> RunOutcome {
    if config.skills.is_empty() {
        ctx.log.warn("no skills defined in config");
        return RunOutcome::NoSkills;
    }

    let skills = resolve_all(&config.skills, &config.sources, &*ctx.log);
    if skills.is_empty() {
        ctx.log.warn("no skills could be resolved from any source");
        return RunOutcome::NothingResolved;
    }
    ctx.log.debug(&format!(
        "resolved {} of {} skills",
        skills.len(),
        config.skills.len()
    ));

    let enabled: Vec<_> = config.enabled_targets().collect();
    if enabled.is_empty() {
        ctx.log.warn("no enabled targets in config");
        return RunOutcome::NoEnabledTargets;
    }

    let mut totals = SyncStats::default();
    let mut targets = Vec::with_capacity(enabled.len());
    for target in enabled {
        ctx.log.stage(&format!(
            "Syncing {} ({})",
            target.name,
            target.path.display()
        ));
        let overlap = config
            .sources
            .iter()
            .find(|source| paths::overlaps(&target.path, source));
        let result = match overlap {
            Some(source) => Err(anyhow!(
                "target directory {} overlaps source root {}",
                target.path.display(),
                source.display()
            )),
            None => reconcile(ctx, &target.path, &skills),
        };
        match &result {
            Ok(report) => {
                let summary = report.stats.summary(ctx.dry_run);
                ctx.log.info(&summary);
                let status = if ctx.dry_run {
                    TargetStatus::DryRun
                } else {
                    TargetStatus::Ok
                };
                ctx.log.record_target(&target.name, status, Some(&summary));
                totals += report.stats;
            }
            Err(e) => {
                let msg = format!("{e:#}");
                ctx.log
                    .error(&format!("target '{}' failed: {msg}", target.name));
                ctx.log
                    .record_target(&target.name, TargetStatus::Failed, Some(&msg));
            }
        }
        targets.push(TargetReport {
            name: target.name.clone(),
            path: target.path.clone(),
            result,
        });
    }

    RunOutcome::Completed { targets, totals }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::Target;
    use crate::logging::RecordingLog;
    use std::path::Path;
    use std::sync::Arc;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new(skills: &[&str]) -> Self {
            let dir = tempfile::tempdir().unwrap();
            for name in skills {
                let skill = dir.path().join("src").join(name);
                std::fs::create_dir_all(&skill).unwrap();
                std::fs::write(skill.join("SKILL.md"), *name).unwrap();
            }
            Self { dir }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.dir.path().join(rel)
        }

        fn config(&self, skills: &[&str], targets: Vec<Target>) -> Config {
            Config {
                path: self.path("skills_config.toml"),
                skills: skills.iter().map(ToString::to_string).collect(),
                sources: vec![self.path("src")],
                targets,
            }
        }
    }

    fn ctx(dry_run: bool) -> (Context, Arc<RecordingLog>) {
        let log = Arc::new(RecordingLog::default());
        (Context::new(log.clone(), dry_run), log)
    }

    fn children(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn no_skills_short_circuits() {
        let fx = Fixture::new(&[]);
        let config = fx.config(&[], vec![Target::new("t", fx.path("out"), true)]);
        let (ctx, log) = ctx(false);

        assert!(matches!(run(&config, &ctx), RunOutcome::NoSkills));
        assert!(!fx.path("out").exists());
        assert_eq!(log.messages("warn").len(), 1);
    }

    #[test]
    fn nothing_resolved_touches_no_target() {
        let fx = Fixture::new(&[]);
        let out = fx.path("out");
        std::fs::create_dir(&out).unwrap();
        std::fs::create_dir(out.join("keep-me")).unwrap();
        let config = fx.config(&["ghost"], vec![Target::new("t", &out, true)]);
        let (ctx, _log) = ctx(false);

        assert!(matches!(run(&config, &ctx), RunOutcome::NothingResolved));
        assert_eq!(children(&out), vec!["keep-me"]);
    }

    #[test]
    fn no_enabled_targets_creates_nothing() {
        let fx = Fixture::new(&["a"]);
        let config = fx.config(&["a"], vec![Target::new("off", fx.path("out"), false)]);
        let (ctx, log) = ctx(false);

        let outcome = run(&config, &ctx);

        assert!(matches!(outcome, RunOutcome::NoEnabledTargets));
        assert_eq!(outcome.failed_targets(), 0);
        assert!(!fx.path("out").exists());
        assert!(log.targets().is_empty());
    }

    #[test]
    fn unresolved_skill_is_dropped_and_others_synced() {
        let fx = Fixture::new(&["a", "b"]);
        let out = fx.path("out");
        let config = fx.config(&["a", "missing", "b"], vec![Target::new("t", &out, true)]);
        let (ctx, log) = ctx(false);

        let outcome = run(&config, &ctx);

        assert_eq!(children(&out), vec!["a", "b"]);
        assert!(log.messages("warn").iter().any(|m| m.contains("missing")));
        let RunOutcome::Completed { totals, .. } = outcome else {
            panic!("expected completed run");
        };
        assert_eq!(totals.applied, 2);
    }

    #[test]
    fn processes_enabled_targets_in_order_and_skips_disabled() {
        let fx = Fixture::new(&["a"]);
        let config = fx.config(
            &["a"],
            vec![
                Target::new("first", fx.path("one"), true),
                Target::new("off", fx.path("off"), false),
                Target::new("second", fx.path("two"), true),
            ],
        );
        let (ctx, log) = ctx(false);

        let outcome = run(&config, &ctx);

        let RunOutcome::Completed { targets, totals } = outcome else {
            panic!("expected completed run");
        };
        let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(totals.applied, 2);
        assert!(!fx.path("off").exists());
        assert_eq!(log.messages("stage").len(), 2);
        let statuses: Vec<TargetStatus> = log.targets().iter().map(|t| t.status).collect();
        assert_eq!(statuses, vec![TargetStatus::Ok, TargetStatus::Ok]);
    }

    #[test]
    fn failed_target_does_not_stop_the_next() {
        let fx = Fixture::new(&["a"]);
        std::fs::write(fx.path("blocked"), "a file where a directory should be").unwrap();
        let config = fx.config(
            &["a"],
            vec![
                Target::new("broken", fx.path("blocked"), true),
                Target::new("fine", fx.path("out"), true),
            ],
        );
        let (ctx, log) = ctx(false);

        let outcome = run(&config, &ctx);

        assert_eq!(outcome.failed_targets(), 1);
        assert_eq!(children(&fx.path("out")), vec!["a"]);
        assert_eq!(log.messages("error").len(), 1);
        let statuses: Vec<TargetStatus> = log.targets().iter().map(|t| t.status).collect();
        assert_eq!(statuses, vec![TargetStatus::Failed, TargetStatus::Ok]);
        let RunOutcome::Completed { totals, .. } = outcome else {
            panic!("expected completed run");
        };
        assert_eq!(totals.applied, 1);
    }

    #[test]
    fn target_that_is_a_source_root_fails_untouched() {
        let fx = Fixture::new(&["a", "b"]);
        let config = fx.config(
            &["a"],
            vec![
                Target::new("same", fx.path("src"), true),
                Target::new("fine", fx.path("out"), true),
            ],
        );
        let (ctx, log) = ctx(false);

        let outcome = run(&config, &ctx);

        assert_eq!(outcome.failed_targets(), 1);
        assert_eq!(children(&fx.path("src")), vec!["a", "b"]);
        assert_eq!(
            std::fs::read_to_string(fx.path("src/a/SKILL.md")).unwrap(),
            "a"
        );
        assert_eq!(children(&fx.path("out")), vec!["a"]);
        let statuses: Vec<TargetStatus> = log.targets().iter().map(|t| t.status).collect();
        assert_eq!(statuses, vec![TargetStatus::Failed, TargetStatus::Ok]);
        assert!(log.messages("error")[0].contains("overlaps source root"));
    }

    #[test]
    fn target_containing_a_source_root_fails_untouched() {
        let fx = Fixture::new(&["a"]);
        std::fs::write(fx.path("notes.txt"), "keep").unwrap();
        let config = fx.config(&["a"], vec![Target::new("parent", fx.dir.path(), true)]);
        let (ctx, log) = ctx(true);

        let outcome = run(&config, &ctx);

        assert_eq!(outcome.failed_targets(), 1);
        assert!(fx.path("notes.txt").exists());
        assert!(fx.path("src/a/SKILL.md").exists());
        assert!(log.messages("dry_run").is_empty());
        assert_eq!(log.targets()[0].status, TargetStatus::Failed);
    }

    #[test]
    fn dry_run_records_dry_run_status_and_changes_nothing() {
        let fx = Fixture::new(&["a"]);
        let config = fx.config(&["a"], vec![Target::new("t", fx.path("out"), true)]);
        let (ctx, log) = ctx(true);

        let outcome = run(&config, &ctx);

        assert!(!fx.path("out").exists());
        assert_eq!(log.targets()[0].status, TargetStatus::DryRun);
        let RunOutcome::Completed { targets, .. } = outcome else {
            panic!("expected completed run");
        };
        let report = targets[0].result.as_ref().unwrap();
        assert_eq!(report.action_lines(), vec!["create base directory", "add a"]);
    }
}
