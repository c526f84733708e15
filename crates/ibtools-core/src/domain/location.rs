//! Resolved utility locations.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::platform::PlatformType;

/// Where a utility was found, and what version it reported.
///
/// Values are immutable once built; the locator produces them and the cache
/// hands out clones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtilityLocation {
    path: PathBuf,
    version: Option<String>,
    platform: PlatformType,
}

impl UtilityLocation {
    pub fn new(path: impl Into<PathBuf>, version: Option<String>, platform: PlatformType) -> Self {
        Self {
            path: path.into(),
            version,
            platform,
        }
    }

    /// Absolute path to the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Version detected by probing, if the executable reported one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Platform the location was resolved for.
    pub const fn platform(&self) -> PlatformType {
        self.platform
    }
}

impl fmt::Display for UtilityLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (version {}, {})",
            self.path.display(),
            self.version.as_deref().unwrap_or("unknown"),
            self.platform
        )
    }
}
