//! `probe` command handler.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Run the version probe against `path` and print what it reported.
pub async fn execute(ctx: &CliContext, path: &Path, timeout_ms: Option<u64>) -> Result<()> {
    let probe = match timeout_ms {
        Some(ms) => ctx
            .probe
            .as_ref()
            .clone()
            .with_timeout(Duration::from_millis(ms)),
        None => ctx.probe.as_ref().clone(),
    };

    let outcome = probe.probe(path).await;
    println!("{}: {outcome}", path.display());
    Ok(())
}
