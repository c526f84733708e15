//! `resolve` command handler.

use anyhow::Result;
use ibtools_core::{ResolveReport, UtilityType};

use super::{BOLD, GREEN, RED, RESET};
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Resolve one utility and print its location.
///
/// With `json` the location is printed as a JSON object; otherwise a
/// human-readable summary followed by the candidates that were checked.
pub async fn execute(
    ctx: &CliContext,
    utility: UtilityType,
    version: Option<&str>,
    json: bool,
) -> Result<()> {
    let report = ctx
        .locator
        .resolve_with_report(utility, version)
        .await
        .map_err(CliError::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.location)?);
    } else {
        print!("{}", render_report(utility, &report));
    }
    Ok(())
}

fn render_report(utility: UtilityType, report: &ResolveReport) -> String {
    let location = &report.location;
    let mut out = format!(
        "{BOLD}{utility}{RESET}: {}\n  version:  {}\n  platform: {}\n",
        location.path().display(),
        location.version().unwrap_or("unknown"),
        location.platform(),
    );

    for attempt in &report.attempts {
        let (mark, color) = if attempt.outcome.is_ok() {
            ("✓", GREEN)
        } else {
            ("✗", RED)
        };
        out.push_str(&format!(
            "  {color}{mark}{RESET} {}: {}\n",
            attempt.candidate.display(),
            attempt.outcome
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibtools_core::{Attempt, AttemptOutcome, PlatformType, UtilityLocation};

    #[test]
    fn test_render_lists_attempts() {
        let report = ResolveReport {
            location: UtilityLocation::new(
                "/opt/1cv8/x86_64/8.3.24.1548/ibcmd",
                Some("8.3.24.1548".to_string()),
                PlatformType::Linux,
            ),
            attempts: vec![
                Attempt::new("/usr/bin/ibcmd", AttemptOutcome::NotFound),
                Attempt::new("/opt/1cv8/x86_64/8.3.24.1548/ibcmd", AttemptOutcome::Ok),
            ],
            from_cache: false,
        };

        let text = render_report(UtilityType::Ibcmd, &report);
        assert!(text.contains("/opt/1cv8/x86_64/8.3.24.1548/ibcmd"));
        assert!(text.contains("version:  8.3.24.1548"));
        assert!(text.contains("/usr/bin/ibcmd: not found"));
        assert_eq!(text.lines().count(), 5);
    }
}
