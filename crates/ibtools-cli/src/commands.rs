//! Available subcommands.

use std::path::PathBuf;

use clap::Subcommand;
use ibtools_core::UtilityType;

/// Diagnostic commands over the resolution engine.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a utility and print where it lives
    Resolve {
        /// Utility to locate (designer, ibcmd, ibsrv, thin-client, thick-client, edt-cli)
        utility: UtilityType,
        /// Required platform version, e.g. 8.3.24.1548
        #[arg(long = "version")]
        version: Option<String>,
        /// Print the location as JSON
        #[arg(long)]
        json: bool,
    },

    /// List candidate paths in search order with their validation outcome
    Candidates {
        /// Utility to list candidates for
        utility: UtilityType,
        /// Required platform version (puts its directory first)
        #[arg(long = "version")]
        version: Option<String>,
    },

    /// Run the version probe against an executable
    Probe {
        /// Path to the executable
        path: PathBuf,
        /// Override the probe timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Resolve every known utility and print a status table
    Check {
        /// Required platform version for runtime utilities
        #[arg(long = "version")]
        version: Option<String>,
    },

    /// Show the detected platform
    Platform,
}
