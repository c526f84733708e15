//! Root CLI parser and global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Locate, validate and version-check installed platform utilities.
#[derive(Parser)]
#[command(name = "ibtools")]
#[command(about = "Locate installed 1C:Enterprise platform utilities")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// JSON settings file layered under IBTOOLS_* environment variables
    #[arg(long = "config", global = true, env = "IBTOOLS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
