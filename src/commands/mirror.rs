//! The mirror command: precondition checks, the walk, and the run summary.
use anyhow::Result;

use crate::cli::Cli;
use crate::error::MirrorError;
use crate::logging::Log;
use crate::walk::{self, ActionKind, MirrorReport};

/// Run the mirror command.
///
/// # Errors
///
/// Returns [`MirrorError::SourceMissing`] or
/// [`MirrorError::DestinationMissing`] before touching anything, and
/// otherwise any error from the walk.
pub fn run(args: &Cli, log: &dyn Log) -> Result<MirrorReport> {
    if !args.source.exists() {
        return Err(MirrorError::SourceMissing(args.source.clone()).into());
    }
    if !args.destination.exists() {
        return Err(MirrorError::DestinationMissing(args.destination.clone()).into());
    }

    log.debug(&format!(
        "mirroring {} -> {}",
        args.source.display(),
        args.destination.display()
    ));
    let report = walk::mirror_tree(&args.source, &args.destination, log)?;

    for line in summary_lines(&report) {
        log.debug(&line);
    }
    Ok(report)
}

/// Render the run summary: one line of totals, then every rename.
#[must_use]
pub fn summary_lines(report: &MirrorReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} created, {} copied, {} directories skipped, {} files skipped, {} hidden",
        report.count(ActionKind::Created),
        report.count(ActionKind::Copied),
        report.count(ActionKind::SkippedDirectory),
        report.count(ActionKind::SkippedFile),
        report.hidden.len(),
    )];
    if !report.renames.is_empty() {
        lines.push(format!("{} renamed:", report.renames.len()));
        lines.extend(
            report
                .renames
                .iter()
                .map(|(from, to)| format!("  {from} -> {to}")),
        );
    }
    lines
}
