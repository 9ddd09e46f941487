#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Integration tests for the `sync` command.
//!
//! These tests drive the command and the run driver against real temporary
//! directories: configuration loading and path expansion, the short-circuit
//! outcomes, and the per-target reconcile results.

mod common;

use std::sync::Arc;

use common::{IntegrationTestContext, TestContextBuilder};
use link_skills::cli::SyncOpts;
use link_skills::commands;
use link_skills::logging::{Log, Logger};
use link_skills::sync::driver::{self, RunOutcome};
use link_skills::sync::{Context, SyncStats};

const TWO_SKILLS: &str = r#"
skills = ["a", "b"]

[sources]
paths = ["./skills"]

[targets.claude]
path = "out/claude"
enabled = true
"#;

fn opts(ctx: &IntegrationTestContext, dry_run: bool) -> SyncOpts {
    SyncOpts {
        config: ctx.config_path(),
        dry_run,
    }
}

fn logger() -> Arc<Logger> {
    Arc::new(Logger::new("sync"))
}

fn run_driver(ctx: &IntegrationTestContext, dry_run: bool) -> (RunOutcome, Arc<Logger>) {
    let log = logger();
    let shared: Arc<dyn Log> = log.clone();
    let outcome = driver::run(&ctx.load_config(), &Context::new(shared, dry_run));
    (outcome, log)
}

// ---------------------------------------------------------------------------
// End-to-end command runs
// ---------------------------------------------------------------------------

#[test]
fn sync_populates_empty_target() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("x.txt", "1")])
        .with_skill("skills", "b", &[("y.txt", "2")])
        .with_config(TWO_SKILLS)
        .build();

    commands::sync::run(&opts(&ctx, false), &logger()).unwrap();

    assert_eq!(ctx.children("out/claude"), vec!["a", "b"]);
    assert_eq!(ctx.read("out/claude/a/x.txt"), "1");
    assert_eq!(ctx.read("out/claude/b/y.txt"), "2");
}

#[test]
fn sync_prunes_stale_entries() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("x.txt", "1")])
        .with_dir("out/claude/old")
        .with_config(
            r#"
skills = ["a"]
[sources]
paths = ["skills"]
[targets.claude]
path = "out/claude"
enabled = true
"#,
        )
        .build();

    commands::sync::run(&opts(&ctx, false), &logger()).unwrap();

    assert_eq!(ctx.children("out/claude"), vec!["a"]);
}

#[test]
fn sync_replaces_stale_skill_content() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("fresh.txt", "new")])
        .with_skill("skills", "b", &[("y.txt", "2")])
        .with_file("out/claude/a/stale.txt", "old")
        .with_config(TWO_SKILLS)
        .build();

    commands::sync::run(&opts(&ctx, false), &logger()).unwrap();

    assert_eq!(ctx.children("out/claude/a"), vec!["fresh.txt"]);
    assert_eq!(ctx.read("out/claude/a/fresh.txt"), "new");
}

#[test]
fn dry_run_leaves_filesystem_untouched() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("x.txt", "1")])
        .with_skill("skills", "b", &[("y.txt", "2")])
        .with_config(TWO_SKILLS)
        .build();

    commands::sync::run(&opts(&ctx, true), &logger()).unwrap();

    assert!(!ctx.path("out").exists());
}

#[test]
fn missing_config_file_is_an_error() {
    let ctx = TestContextBuilder::new().build();
    let err = commands::sync::run(&opts(&ctx, false), &logger()).unwrap_err();
    assert!(err.to_string().contains("not found"), "{err}");
}

#[test]
fn malformed_toml_is_an_error() {
    let ctx = TestContextBuilder::new()
        .with_config("skills = [\"a\"\n[sources\n")
        .build();
    assert!(commands::sync::run(&opts(&ctx, false), &logger()).is_err());
}

#[test]
fn shape_error_is_a_warning_not_a_failure() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("x.txt", "1")])
        .with_config("skills = [\"a\"]\n[sources]\npaths = [\"skills\"]\n")
        .build();

    commands::sync::run(&opts(&ctx, false), &logger()).unwrap();

    assert!(!ctx.path("out").exists());
}

#[test]
fn failed_target_fails_the_command_but_others_still_sync() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("x.txt", "1")])
        .with_file("blocked", "a file where the target directory should be")
        .with_config(
            r#"
skills = ["a"]
[sources]
paths = ["skills"]
[targets.broken]
path = "blocked"
enabled = true
[targets.fine]
path = "out/fine"
enabled = true
"#,
        )
        .build();
    let log = logger();

    let err = commands::sync::run(&opts(&ctx, false), &log).unwrap_err();

    assert!(err.to_string().contains("1 target(s) failed"), "{err}");
    assert_eq!(ctx.children("out/fine"), vec!["a"]);
    assert_eq!(log.failure_count(), 1);
}

#[test]
fn target_overlapping_a_source_is_refused() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("SKILL.md", "keep")])
        .with_skill("skills", "b", &[("SKILL.md", "keep")])
        .with_config(
            r#"
skills = ["a"]
[sources]
paths = ["skills"]
[targets.self]
path = "skills"
enabled = true
"#,
        )
        .build();
    let log = logger();

    let err = commands::sync::run(&opts(&ctx, false), &log).unwrap_err();

    assert!(err.to_string().contains("1 target(s) failed"), "{err}");
    assert_eq!(ctx.children("skills"), vec!["a", "b"]);
    assert_eq!(ctx.read("skills/a/SKILL.md"), "keep");
}

#[test]
fn zero_enabled_targets_command_succeeds() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("x.txt", "1")])
        .with_config("skills = [\"a\"]\n[sources]\npaths = [\"skills\"]\n[targets.cursor]\npath = \"out\"\n")
        .build();
    let log = logger();

    commands::sync::run(&opts(&ctx, false), &log).unwrap();

    assert_eq!(log.failure_count(), 0);
    assert!(!ctx.path("out").exists());
}

// ---------------------------------------------------------------------------
// Driver outcomes
// ---------------------------------------------------------------------------

#[test]
fn zero_enabled_targets_processes_nothing() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("x.txt", "1")])
        .with_config(
            r#"
skills = ["a"]
[sources]
paths = ["skills"]
[targets.cursor]
path = "out/cursor"
"#,
        )
        .build();

    let (outcome, log) = run_driver(&ctx, false);

    assert!(matches!(outcome, RunOutcome::NoEnabledTargets));
    assert!(!ctx.path("out").exists());
    assert_eq!(log.failure_count(), 0);
}

#[test]
fn earlier_source_root_shadows_later_one() {
    let ctx = TestContextBuilder::new()
        .with_skill("primary", "a", &[("from.txt", "primary")])
        .with_skill("fallback", "a", &[("from.txt", "fallback")])
        .with_skill("fallback", "b", &[("from.txt", "fallback")])
        .with_config(
            r#"
skills = ["a", "b"]
[sources]
paths = ["primary", "fallback"]
[targets.claude]
path = "out"
enabled = true
"#,
        )
        .build();

    let (outcome, _log) = run_driver(&ctx, false);

    assert!(matches!(outcome, RunOutcome::Completed { .. }));
    assert_eq!(ctx.read("out/a/from.txt"), "primary");
    assert_eq!(ctx.read("out/b/from.txt"), "fallback");
}

#[test]
fn totals_sum_every_target() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "a", &[("x.txt", "1")])
        .with_skill("skills", "b", &[("y.txt", "2")])
        .with_dir("out/two/a")
        .with_dir("out/two/junk")
        .with_config(
            r#"
skills = ["a", "b"]
[sources]
paths = ["skills"]
[targets.one]
path = "out/one"
enabled = true
[targets.two]
path = "out/two"
enabled = true
"#,
        )
        .build();

    let (outcome, _log) = run_driver(&ctx, false);

    let RunOutcome::Completed { targets, totals } = outcome else {
        panic!("expected completed run");
    };
    assert_eq!(targets.len(), 2);
    assert_eq!(
        totals,
        SyncStats {
            applied: 4,
            updated: 1,
            removed: 1,
            skipped: 0,
            failed: 0,
        }
    );
}

#[test]
fn dry_run_plan_matches_real_run() {
    let ctx = TestContextBuilder::new()
        .with_skill("skills", "architect", &[("SKILL.md", "fresh")])
        .with_skill("skills", "frontend-design", &[("SKILL.md", "fd")])
        .with_file("out/architect/SKILL.md", "stale")
        .with_dir("out/old")
        .with_file("out/stray.txt", "x")
        .with_config(
            r#"
skills = ["architect", "missing", "frontend-design"]
[sources]
paths = ["skills"]
[targets.claude]
path = "out"
enabled = true
"#,
        )
        .build();

    let (preview, log) = run_driver(&ctx, true);
    let RunOutcome::Completed { targets, .. } = preview else {
        panic!("expected completed run");
    };
    let planned = targets[0].result.as_ref().unwrap().action_lines();
    insta::assert_snapshot!(planned.join("\n"), @r"
    remove directory old
    remove file stray.txt
    update architect (replacing directory)
    add frontend-design
    ");
    assert_eq!(log.failure_count(), 0);
    assert_eq!(ctx.read("out/architect/SKILL.md"), "stale");

    let (real, _log) = run_driver(&ctx, false);
    let RunOutcome::Completed { targets, .. } = real else {
        panic!("expected completed run");
    };
    assert_eq!(targets[0].result.as_ref().unwrap().action_lines(), planned);
    assert_eq!(
        ctx.children("out"),
        vec!["architect".to_string(), "frontend-design".to_string()]
    );
    assert_eq!(ctx.read("out/architect/SKILL.md"), "fresh");
}

#[test]
fn home_relative_and_config_relative_paths_expand() {
    let ctx = TestContextBuilder::new()
        .with_config(
            r#"
skills = ["a"]
[sources]
paths = ["./skills/../skills"]
[targets.claude]
path = "~/.claude/skills"
"#,
        )
        .build();

    let config = ctx.load_config();

    let root = dunce::canonicalize(ctx.root_path()).unwrap();
    assert_eq!(config.sources, vec![root.join("skills")]);
    assert!(config.targets[0].path.is_absolute());
    assert!(config.targets[0].path.ends_with(".claude/skills"));
    assert!(!config.targets[0].enabled);
}
