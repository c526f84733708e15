//! Platform utility identities.
//!
//! Every executable the engine knows how to locate is a variant of
//! [`UtilityType`]. Variants carry their base executable name and a few
//! derived properties; nothing here touches the filesystem.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::platform::PlatformType;

/// A named executable belonging to the platform toolset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtilityType {
    /// Interactive configurator (designer mode of the thick client binary).
    Designer,
    /// Standalone command-line administration tool.
    Ibcmd,
    /// Standalone server process.
    Ibsrv,
    /// Thin client.
    ThinClient,
    /// Thick client.
    ThickClient,
    /// EDT command-line interface. Shipped with the IDE, not the platform.
    EdtCli,
}

impl UtilityType {
    /// Every utility, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Designer,
        Self::Ibcmd,
        Self::Ibsrv,
        Self::ThinClient,
        Self::ThickClient,
        Self::EdtCli,
    ];

    /// Stable identifier used for parsing, display and environment variables.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Designer => "designer",
            Self::Ibcmd => "ibcmd",
            Self::Ibsrv => "ibsrv",
            Self::ThinClient => "thin-client",
            Self::ThickClient => "thick-client",
            Self::EdtCli => "edt-cli",
        }
    }

    /// Executable name without any platform extension.
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::Designer | Self::ThickClient => "1cv8",
            Self::Ibcmd => "ibcmd",
            Self::Ibsrv => "ibsrv",
            Self::ThinClient => "1cv8c",
            Self::EdtCli => "1cedtcli",
        }
    }

    /// Executable file name on the given platform (`ibcmd.exe` on Windows).
    pub fn file_name(self, platform: PlatformType) -> String {
        format!("{}{}", self.base_name(), platform.executable_extension())
    }

    /// Whether the utility is part of the platform runtime distribution.
    ///
    /// Runtime utilities live in versioned installation directories; the EDT
    /// CLI is installed with the IDE and is searched for differently.
    pub const fn is_platform_runtime(self) -> bool {
        !matches!(self, Self::EdtCli)
    }

    /// Name of the environment variable that overrides this utility's path.
    ///
    /// `thin-client` becomes `IBTOOLS_THIN_CLIENT_PATH`.
    pub fn override_env_var(self) -> String {
        format!(
            "IBTOOLS_{}_PATH",
            self.id().replace('-', "_").to_ascii_uppercase()
        )
    }
}

impl fmt::Display for UtilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string names no known utility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown utility '{input}' (expected one of: designer, ibcmd, ibsrv, thin-client, thick-client, edt-cli)")]
pub struct ParseUtilityError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for UtilityType {
    type Err = ParseUtilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|utility| utility.id() == normalized)
            .ok_or_else(|| ParseUtilityError {
                input: s.to_string(),
            })
    }
}
