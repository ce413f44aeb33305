//! Top-down tree walk that mirrors a source tree onto a destination.
//!
//! Each directory is handled in one step: its subdirectories are created (or
//! reported as already present), then its files are copied (or silently
//! skipped), and only then does the walk descend into the subdirectories.
//! Entries are visited in the order the OS lists them.
//!
//! Nothing is ever overwritten or removed at the destination, and any I/O
//! error ends the run, leaving whatever was already mirrored in place.
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use filetime::FileTime;

use crate::logging::Log;
use crate::resolve::destination;
use crate::sanitise::Renames;

/// What the walk did with one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Destination directory was created.
    Created,
    /// Destination directory already existed.
    SkippedDirectory,
    /// File was copied.
    Copied,
    /// Destination file already existed.
    SkippedFile,
}

/// One visited, non-hidden entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// What happened.
    pub kind: ActionKind,
    /// Path in the source tree.
    pub source: PathBuf,
    /// Sanitised path in the destination tree.
    pub destination: PathBuf,
}

/// Everything a mirror run did, in visiting order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorReport {
    /// Actions for every non-hidden entry.
    pub actions: Vec<Action>,
    /// Hidden source entries that were left out.
    pub hidden: Vec<PathBuf>,
    /// Names that had to change to fit ExFAT.
    pub renames: Renames,
}

impl MirrorReport {
    /// Number of actions of the given kind.
    #[must_use]
    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind == kind).count()
    }
}

/// A directory entry as the walk classifies it.
struct Entry {
    name: OsString,
    path: PathBuf,
    /// Listed through a symlink; never descended into.
    via_link: bool,
}

/// Mirror everything below `src_root` into `dst_root`.
///
/// Both roots must already exist. Returns the report of the run, including
/// every rename the sanitiser applied.
///
/// # Errors
///
/// Returns an error as soon as a directory cannot be listed, a destination
/// directory cannot be created, or a file cannot be copied.
pub fn mirror_tree(src_root: &Path, dst_root: &Path, log: &dyn Log) -> Result<MirrorReport> {
    let mut report = MirrorReport::default();
    step(src_root, dst_root, src_root, log, &mut report)?;
    Ok(report)
}

/// Handle the immediate entries of `dir`, then recurse into its subdirectories.
fn step(
    src_root: &Path,
    dst_root: &Path,
    dir: &Path,
    log: &dyn Log,
    report: &mut MirrorReport,
) -> Result<()> {
    let (dirs, files) = list_dir(dir)?;
    let mut descend = Vec::with_capacity(dirs.len());

    for entry in dirs {
        let name = entry.name.to_string_lossy();
        if is_hidden(&name) {
            log.debug(&format!("hidden: {}", entry.path.display()));
            report.hidden.push(entry.path);
            continue;
        }
        let dest = destination(src_root, dst_root, &entry.path, &mut report.renames)?;
        let kind = if dest.exists() {
            log.action(&format!("skipping: {name} -> {}", dest.display()));
            ActionKind::SkippedDirectory
        } else {
            log.action(&format!("creating: {name} -> {}", dest.display()));
            fs::create_dir(&dest)
                .with_context(|| format!("creating directory {}", dest.display()))?;
            ActionKind::Created
        };
        if !entry.via_link {
            descend.push(entry.path.clone());
        }
        report.actions.push(Action {
            kind,
            source: entry.path,
            destination: dest,
        });
    }

    for entry in files {
        let name = entry.name.to_string_lossy();
        if is_hidden(&name) {
            log.debug(&format!("hidden: {}", entry.path.display()));
            report.hidden.push(entry.path);
            continue;
        }
        let dest = destination(src_root, dst_root, &entry.path, &mut report.renames)?;
        let kind = if dest.exists() {
            log.debug(&format!("exists: {name} -> {}", dest.display()));
            ActionKind::SkippedFile
        } else {
            log.action(&format!("copying: {name} -> {}", dest.display()));
            copy_file_with_metadata(&entry.path, &dest)?;
            ActionKind::Copied
        };
        report.actions.push(Action {
            kind,
            source: entry.path,
            destination: dest,
        });
    }

    for sub in descend {
        step(src_root, dst_root, &sub, log, report)?;
    }
    Ok(())
}

/// Returns `true` for names that follow the dot-file convention.
fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Split the entries of `dir` into directories and everything else.
///
/// A symlink counts as a directory when its target is one; anything whose
/// target cannot be resolved counts as a file.
fn list_dir(dir: &Path) -> Result<(Vec<Entry>, Vec<Entry>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("reading file type of {}", path.display()))?;
        let via_link = file_type.is_symlink();
        let is_dir = if via_link { path.is_dir() } else { file_type.is_dir() };
        let item = Entry {
            name: entry.file_name(),
            path,
            via_link,
        };
        if is_dir {
            dirs.push(item);
        } else {
            files.push(item);
        }
    }
    Ok((dirs, files))
}

/// Copy a file's content, permissions and timestamps.
fn copy_file_with_metadata(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    let meta = fs::metadata(src).with_context(|| format!("reading metadata of {}", src.display()))?;
    filetime::set_file_times(
        dst,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
    .with_context(|| format!("setting timestamps on {}", dst.display()))?;
    Ok(())
}
