//! Console/file logger backed by `tracing`.
use std::path::{Path, PathBuf};

use super::types::{ACTION_TARGET, Log};

/// Implement the methods of [`Log`] by delegating to inherent methods of the
/// same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Logger that routes every message through `tracing`.
///
/// Where the messages end up is decided by the subscriber installed with
/// [`init_subscriber`](super::subscriber::init_subscriber): the console
/// always, and the `--log-file` when one was given.
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// `log_file` is only remembered for display; the file itself is opened
    /// by the subscriber.
    #[must_use]
    pub fn new(log_file: Option<&Path>) -> Self {
        Self {
            log_file: log_file.map(Path::to_path_buf),
        }
    }

    /// Return the log file path, if one was configured.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Log an error message (stderr on console, `[error]` in the log file).
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Emit an action line such as `creating: a -> /dst/a`.
    pub fn action(&self, msg: &str) {
        tracing::info!(target: ACTION_TARGET, "{msg}");
    }
}

impl Log for Logger {
    forward_log_methods!(debug, error, action);
}
