//! Command: sync every enabled target with the configured skills.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::SyncOpts;
use crate::commands::version;
use crate::config::{self, validation};
use crate::logging::{Log, Logger};
use crate::sync::driver::{self, RunOutcome};
use crate::sync::Context;

/// Run the sync command.
///
/// A configuration that parses but has an unusable shape is reported as a
/// warning and ends the run successfully without touching any target.
///
/// # Errors
///
/// Returns an error if the configuration file is missing, unreadable, or not
/// valid TOML, or if any target could not be reconciled.
pub fn run(opts: &SyncOpts, log: &Arc<Logger>) -> Result<()> {
    let shared: Arc<dyn Log> = log.clone();
    sync_targets(opts, shared)?;

    log.print_summary();

    let failed = log.failure_count();
    if failed > 0 {
        anyhow::bail!("{failed} target(s) failed");
    }
    Ok(())
}

/// Load the configuration and reconcile every enabled target, reporting
/// through `log`.
fn sync_targets(opts: &SyncOpts, log: Arc<dyn Log>) -> Result<()> {
    log.info(&format!("link-skills {}", version::version()));

    log.stage("Loading configuration");
    let config = match config::load(&opts.config) {
        Ok(config) => config,
        Err(e) if e.is_shape_error() => {
            log.warn(&format!("{e}; nothing to do"));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    log.info(&format!(
        "loaded {} skills, {} sources, {} targets from {}",
        config.skills.len(),
        config.sources.len(),
        config.targets.len(),
        config.path.display()
    ));

    let warnings = validation::validate(&config);
    if !warnings.is_empty() {
        log.warn(&format!(
            "found {} configuration warning(s):",
            warnings.len()
        ));
        for warning in &warnings {
            log.warn(&format!("  [{}]: {}", warning.item, warning.message));
        }
    }

    if opts.dry_run {
        log.info("dry run: no changes will be made");
    }

    let ctx = Context::new(log, opts.dry_run);
    match driver::run(&config, &ctx) {
        RunOutcome::Completed { totals, .. } => {
            ctx.log
                .debug(&format!("total: {}", totals.summary(opts.dry_run)));
        }
        RunOutcome::NoSkills | RunOutcome::NothingResolved | RunOutcome::NoEnabledTargets => {
            ctx.log.info("no targets processed");
        }
    }
    Ok(())
}
