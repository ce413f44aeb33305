// Shared helpers for integration tests.
//
// Provides a pair of temporary source/destination directories, a fluent way
// to populate the source tree, and a log that captures action lines so tests
// can assert on exactly what the mirror printed.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use exfat_mirror::logging::Log;
use exfat_mirror::walk::{MirrorReport, mirror_tree};

/// A [`Log`] that keeps action lines and drops everything else.
#[derive(Debug, Default)]
pub struct CaptureLog {
    actions: Mutex<Vec<String>>,
}

impl CaptureLog {
    /// Action lines in emission order.
    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().expect("capture lock").clone()
    }
}

impl Log for CaptureLog {
    fn debug(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}

    fn action(&self, msg: &str) {
        self.actions
            .lock()
            .expect("capture lock")
            .push(msg.to_string());
    }
}

/// Source and destination roots backed by [`tempfile::TempDir`].
///
/// Both directories are deleted when the fixture is dropped.
pub struct MirrorFixture {
    src: tempfile::TempDir,
    dst: tempfile::TempDir,
}

impl MirrorFixture {
    /// Create an empty source and an empty destination.
    pub fn new() -> Self {
        Self {
            src: tempfile::tempdir().expect("create source dir"),
            dst: tempfile::tempdir().expect("create destination dir"),
        }
    }

    /// Create `rel` (and any parents) as a directory in the source tree.
    #[must_use]
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.src.path().join(rel)).expect("create source subdir");
        self
    }

    /// Write `content` to `rel` in the source tree, creating parents.
    #[must_use]
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.src.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("write source file");
        self
    }

    /// Source root.
    pub fn src(&self) -> &Path {
        self.src.path()
    }

    /// Destination root.
    pub fn dst(&self) -> &Path {
        self.dst.path()
    }

    /// `rel` joined onto the destination root.
    pub fn dst_path(&self, rel: &str) -> PathBuf {
        self.dst.path().join(rel)
    }

    /// Run one mirror pass, returning the report and the captured action lines.
    pub fn mirror(&self) -> (MirrorReport, Vec<String>) {
        let log = CaptureLog::default();
        let report = mirror_tree(self.src(), self.dst(), &log).expect("mirror run");
        (report, log.actions())
    }

    /// Every path under the destination root, relative and sorted.
    pub fn dst_listing(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect(self.dst(), self.dst(), &mut out);
        out.sort();
        out
    }
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in std::fs::read_dir(dir).expect("read destination dir") {
        let path = entry.expect("destination entry").path();
        let rel = path
            .strip_prefix(root)
            .expect("under root")
            .to_string_lossy()
            .replace('\\', "/");
        out.push(rel);
        if path.is_dir() {
            collect(root, &path, out);
        }
    }
}
