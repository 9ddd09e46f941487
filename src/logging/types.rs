//! Core logging types: target entries, status, and the [`Log`] trait.

/// Per-target result for the run summary.
#[derive(Debug, Clone)]
pub struct TargetEntry {
    /// Target name as declared in the configuration.
    pub name: String,
    /// Final status of the target.
    pub status: TargetStatus,
    /// Optional detail message (stats line or error description).
    pub message: Option<String>,
}

/// Status of a processed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    /// Target was reconciled.
    Ok,
    /// Target was previewed; nothing was changed.
    DryRun,
    /// Target could not be reconciled.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards everything to `tracing`; tests
/// substitute a recording implementation to assert on reported events.
pub trait Log: Send + Sync {
    /// Log a stage header (one per target).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (console only when verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a planned mutation in preview mode.
    fn dry_run(&self, msg: &str);
    /// Record a target result for the summary.
    fn record_target(&self, name: &str, status: TargetStatus, message: Option<&str>);
}
