//! Domain-specific error types for the mirror engine.
//!
//! Precondition failures are typed with [`thiserror`] so callers and tests can
//! match on them. I/O failures during the walk are reported through
//! [`anyhow::Error`] with context attached at the call site, and every error
//! reaches `main` through the `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! MirrorError
//! ├── SourceMissing       — source root does not exist
//! ├── DestinationMissing  — destination root does not exist
//! ├── OutsideSource       — a walked path is not rooted under the source
//! └── UnusableName        — a name sanitises to "", "." or ".."
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Precondition violations that abort a mirror run.
#[derive(Error, Debug)]
pub enum MirrorError {
    /// The source directory given on the command line does not exist.
    #[error("source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    /// The destination directory given on the command line does not exist.
    #[error("destination directory does not exist: {}", .0.display())]
    DestinationMissing(PathBuf),

    /// A path handed to the resolver is not below the source root.
    #[error("path {} is not under source root {}", path.display(), root.display())]
    OutsideSource {
        /// Path that failed the check.
        path: PathBuf,
        /// Source root it was checked against.
        root: PathBuf,
    },

    /// A name below the source root sanitises to a segment no directory can
    /// hold: empty, `.` or `..`.
    #[error("{} has no usable ExFAT name (sanitises to {sanitised:?})", path.display())]
    UnusableName {
        /// Source path that could not be mapped.
        path: PathBuf,
        /// What the sanitiser made of that component.
        sanitised: String,
    },
}
