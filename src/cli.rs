//! Command-line interface definition.
use std::path::PathBuf;

use clap::Parser;

/// Mirror a directory tree onto an ExFAT volume.
///
/// Copies everything below SOURCE into DESTINATION, renaming entries whose
/// names ExFAT cannot hold and skipping anything that already exists.
#[derive(Parser, Debug)]
#[command(name = "exfat-mirror", version)]
pub struct Cli {
    /// Source directory to mirror from
    pub source: PathBuf,

    /// Destination directory to mirror into
    pub destination: PathBuf,

    /// Show renames, hidden entries and a run summary
    #[arg(short, long)]
    pub verbose: bool,

    /// Append all output, including debug messages, to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
