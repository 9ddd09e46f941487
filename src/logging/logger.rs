//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, TargetEntry, TargetStatus};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Every message is emitted as a `tracing` event; the subscriber installed
/// by [`init_subscriber`](super::subscriber::init_subscriber) decides where
/// it ends up (console and `$XDG_CACHE_HOME/link-skills/<command>.log`).
#[derive(Debug)]
pub struct Logger {
    targets: Mutex<Vec<TargetEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// created by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            targets: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Create a logger that reports `path` as its log file.
    #[cfg(test)]
    pub(crate) const fn with_log_file(path: PathBuf) -> Self {
        Self {
            targets: Mutex::new(Vec::new()),
            log_file: Some(path),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded target entries (test-only).
    #[cfg(test)]
    pub(crate) fn target_entries(&self) -> Vec<TargetEntry> {
        self.targets.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a planned mutation in preview mode.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a target result for the summary.
    pub fn record_target(&self, name: &str, status: TargetStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.targets.lock() {
            guard.push(TargetEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed targets.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.targets.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|t| t.status == TargetStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded targets.
    pub fn print_summary(&self) {
        let targets = match self.targets.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if targets.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for target in &targets {
            let (icon, color) = match target.status {
                TargetStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                TargetStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                TargetStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = target
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", target.name));
        }

        let total = ok + dry_run + failed;
        self.info(&format!(
            "{total} targets: \x1b[32m{ok} ok\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_target(&self, name: &str, status: TargetStatus, message: Option<&str>) {
        self.record_target(name, status, message);
    }
}
