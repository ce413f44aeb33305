//! ExFAT mirror engine.
//!
//! Recursively copies a directory tree onto an ExFAT volume. Names that
//! ExFAT cannot store (control characters, `/ \ : * ? " < > |`, more than
//! 255 characters) are sanitised on the way, hidden entries are left out,
//! and anything already present at the destination is skipped.
//!
//! The public API is organised into layers:
//!
//! - **[`sanitise`]** — per-name sanitisation and the rename record
//! - **[`resolve`]** — mapping a source path to its destination path
//! - **[`walk`]** — the top-down walk that creates directories and copies files
//! - **[`commands`]** — the CLI command wrapping the walk
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod resolve;
pub mod sanitise;
pub mod walk;
