//! Logging infrastructure for structured console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, TargetEntry, TargetStatus};

/// Create a Logger backed by an isolated per-thread tracing subscriber
/// with a [`FileLayer`](subscriber::FileLayer) writing into a temp dir, so
/// that events emitted by logger methods reach a file the test can read.
///
/// The returned guard must be kept alive for the duration of the test.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("test.log");
    let file_layer = subscriber::FileLayer::open(&path).expect("failed to create file layer");
    let log = Logger::with_log_file(path);
    let subscriber =
        tracing_subscriber::registry().with(file_layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (log, tmp, guard)
}

/// A [`Log`] implementation that keeps every event in memory.
///
/// Lets sync tests assert on *which kind* of event was reported without
/// depending on console formatting.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLog {
    events: std::sync::Mutex<Vec<(&'static str, String)>>,
    targets: std::sync::Mutex<Vec<TargetEntry>>,
}

#[cfg(test)]
impl RecordingLog {
    fn push(&self, kind: &'static str, msg: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((kind, msg.to_string()));
        }
    }

    /// Messages logged with the given kind (`"warn"`, `"dry_run"`, ...).
    pub(crate) fn messages(&self, kind: &str) -> Vec<String> {
        self.events.lock().map_or_else(
            |_| vec![],
            |events| {
                events
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, m)| m.clone())
                    .collect()
            },
        )
    }

    /// Targets recorded for the summary.
    pub(crate) fn targets(&self) -> Vec<TargetEntry> {
        self.targets.lock().map_or_else(|_| vec![], |t| t.clone())
    }
}

#[cfg(test)]
impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_target(&self, name: &str, status: TargetStatus, message: Option<&str>) {
        if let Ok(mut targets) = self.targets.lock() {
            targets.push(TargetEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
