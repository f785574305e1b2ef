//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Computer-club day-log replay.
///
/// Reads a header (table count, operating hours, hourly price) followed by
/// a time-ordered list of client actions, and prints the per-action output
/// plus the end-of-day table summary.
#[derive(Debug, Parser)]
#[command(name = "club", version, about, long_about = None)]
pub struct Cli {
    /// Path to the day-log file.
    pub input: PathBuf,

    /// Emit the report as JSON instead of the line protocol.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
