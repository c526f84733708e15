//! `candidates` command handler.
//!
//! Shows the search order without running anything, which is usually the
//! quickest way to see why the wrong installation is picked up.

use anyhow::Result;
use ibtools_core::{CandidateSource, UtilityType, UtilityValidator};

use super::{BOLD, GREEN, RED, RESET};
use crate::bootstrap::CliContext;

pub fn execute(ctx: &CliContext, utility: UtilityType, version: Option<&str>) -> Result<()> {
    let platform = ctx.locator.platform();
    let candidates = ctx.strategy.candidates(utility, platform, version);

    println!(
        "{BOLD}Candidates for {utility} on {platform}{RESET} ({} total)",
        candidates.len()
    );
    for (index, candidate) in candidates.iter().enumerate() {
        let outcome = ctx.validator.check(candidate);
        let color = if outcome.is_ok() { GREEN } else { RED };
        println!(
            "{:>3}. {} {color}[{outcome}]{RESET}",
            index + 1,
            candidate.display()
        );
    }

    if candidates.is_empty() {
        println!("  (none; set {} to point at the executable)", utility.override_env_var());
    }
    Ok(())
}
