//! CLI error type and exit codes.

use ibtools_core::{SettingsError, UtilityNotFound};
use thiserror::Error;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// A utility could not be located.
    #[error(transparent)]
    NotFound(#[from] UtilityNotFound),

    /// Some utilities checked by a batch command are missing.
    #[error("{0}")]
    Unavailable(String),

    /// Settings file or environment is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to an exit code (see sysexits.h).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) | Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Config(_) => 78,                          // EX_CONFIG
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibtools_core::UtilityType;

    #[test]
    fn test_exit_codes() {
        let not_found = CliError::from(UtilityNotFound::new(UtilityType::Ibcmd, None, Vec::new()));
        assert_eq!(not_found.exit_code(), 69);

        let config = CliError::from(SettingsError::InvalidValue {
            field: "cache_ttl_secs",
            reason: "must be greater than 0".to_string(),
        });
        assert_eq!(config.exit_code(), 78);
        assert!(config.to_string().starts_with("Configuration error"));

        let unavailable = CliError::Unavailable("2 of 5 utilities missing".to_string());
        assert_eq!(unavailable.exit_code(), 69);
        assert_eq!(unavailable.to_string(), "2 of 5 utilities missing");
    }

    #[test]
    fn test_not_found_message_is_passed_through() {
        let err = CliError::from(UtilityNotFound::new(
            UtilityType::Ibsrv,
            Some("8.3.24.1".to_string()),
            Vec::new(),
        ));
        assert!(err.to_string().starts_with("Could not locate 'ibsrv'"));
    }
}
