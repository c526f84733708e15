//! Host operating system detection.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Operating system family the utilities are resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    Windows,
    Linux,
    MacOs,
}

static CURRENT: LazyLock<PlatformType> = LazyLock::new(PlatformType::detect);

impl PlatformType {
    /// The platform of the running process.
    ///
    /// Computed once and fixed for the lifetime of the process.
    pub fn current() -> Self {
        *CURRENT
    }

    // Other unix-likes share the Linux installation layout.
    const fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Extension appended to executable file names.
    pub const fn executable_extension(self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            Self::Linux | Self::MacOs => "",
        }
    }

    /// Separator used in `PATH`-style lists.
    pub const fn path_separator(self) -> char {
        match self {
            Self::Windows => ';',
            Self::Linux | Self::MacOs => ':',
        }
    }

    /// Display name for this platform.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
        }
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_is_stable() {
        assert_eq!(PlatformType::current(), PlatformType::current());
    }

    #[test]
    fn test_current_matches_target() {
        let platform = PlatformType::current();
        #[cfg(target_os = "windows")]
        assert_eq!(platform, PlatformType::Windows);
        #[cfg(target_os = "macos")]
        assert_eq!(platform, PlatformType::MacOs);
        #[cfg(target_os = "linux")]
        assert_eq!(platform, PlatformType::Linux);
        let _ = platform;
    }

    #[test]
    fn test_extensions() {
        assert_eq!(PlatformType::Windows.executable_extension(), ".exe");
        assert!(PlatformType::Linux.executable_extension().is_empty());
        assert!(PlatformType::MacOs.executable_extension().is_empty());
    }
}
