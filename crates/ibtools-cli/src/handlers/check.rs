//! `check` command handler.

use anyhow::Result;
use ibtools_core::{UtilityLocation, UtilityType};
use tracing::debug;

use super::{BOLD, GREEN, RED, RESET};
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Resolve every utility and print a status table.
///
/// The version constraint applies to platform runtime utilities only; the
/// EDT CLI is versioned independently. Fails with
/// [`CliError::Unavailable`] if anything is missing.
pub async fn execute(ctx: &CliContext, version: Option<&str>) -> Result<()> {
    println!(
        "{BOLD}{:<14} {:<10} {:<16} {}{RESET}",
        "UTILITY", "STATUS", "VERSION", "PATH"
    );
    println!("{}", "=".repeat(80));

    let mut missing = Vec::new();
    for utility in UtilityType::ALL {
        let required = version.filter(|_| utility.is_platform_runtime());
        match ctx.locator.resolve(utility, required).await {
            Ok(location) => println!("{}", found_row(utility, &location)),
            Err(err) => {
                debug!(utility = %utility, error = %err, "Utility missing");
                println!(
                    "{:<14} {RED}{:<10}{RESET} {:<16} {}",
                    utility.id(),
                    "missing",
                    "-",
                    utility.override_env_var()
                );
                missing.push(utility);
            }
        }
    }

    println!("{}", "=".repeat(80));
    let total = UtilityType::ALL.len();
    if missing.is_empty() {
        println!("{GREEN}✓ All {total} utilities found{RESET}");
        return Ok(());
    }

    let names: Vec<&str> = missing.iter().map(|u| u.id()).collect();
    Err(CliError::Unavailable(format!(
        "{} of {total} utilities not found: {}",
        missing.len(),
        names.join(", ")
    ))
    .into())
}

fn found_row(utility: UtilityType, location: &UtilityLocation) -> String {
    format!(
        "{:<14} {GREEN}{:<10}{RESET} {:<16} {}",
        utility.id(),
        "found",
        location.version().unwrap_or("unknown"),
        location.path().display()
    )
}
