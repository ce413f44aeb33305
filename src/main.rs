//! `exfat-mirror` binary entry point.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use exfat_mirror::{cli, commands, logging};

fn main() -> Result<ExitCode> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose, args.log_file.as_deref())?;
    let log = logging::Logger::new(args.log_file.as_deref());

    // Failures go through the logger so --log-file records them too.
    if let Err(e) = commands::mirror::run(&args, &log) {
        log.error(&format!("{e:#}"));
        return Ok(ExitCode::FAILURE);
    }

    if let Some(path) = log.log_path() {
        log.debug(&format!("log: {}", path.display()));
    }
    Ok(ExitCode::SUCCESS)
}
