//! Version probing port.

use std::path::Path;

use async_trait::async_trait;

/// Asks an executable which version it is.
///
/// Probing is best-effort: `None` means "unknown" and covers timeouts,
/// spawn failures and output without a version token alike.
#[async_trait]
pub trait VersionProbe: Send + Sync {
    async fn extract_version(&self, executable: &Path) -> Option<String>;
}
