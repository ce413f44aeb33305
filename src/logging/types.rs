//! The [`Log`] trait shared by the walker and its callers.

/// Tracing target used for action lines (`creating:`, `copying:`, ...).
pub const ACTION_TARGET: &str = "exfat_mirror::action";

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing`; tests substitute a
/// recording implementation so the walker's output can be asserted without
/// installing a global subscriber.
pub trait Log {
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log the error that ended a run.
    fn error(&self, msg: &str);
    /// Report one mirror action line, printed verbatim on stdout.
    fn action(&self, msg: &str);
}

/// A [`Log`] that keeps every message in memory.
///
/// Messages are stored as `"<level> <msg>"`, with `action` as the level for
/// action lines, so tests can filter by kind.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingLog {
    lines: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingLog {
    fn push(&self, level: &str, msg: &str) {
        if let Ok(mut guard) = self.lines.lock() {
            guard.push(format!("{level} {msg}"));
        }
    }

    /// All recorded lines in emission order.
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Only the action lines, without the level prefix.
    pub(crate) fn actions(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| l.strip_prefix("action ").map(String::from))
            .collect()
    }
}

#[cfg(test)]
impl Log for RecordingLog {
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }

    fn error(&self, msg: &str) {
        self.push("error", msg);
    }

    fn action(&self, msg: &str) {
        self.push("action", msg);
    }
}
