//! Locator settings and validation.
//!
//! All fields are optional so a settings file can name only what it changes;
//! the `effective_*` accessors fill in defaults. Environment variables layer
//! on top of whatever was loaded from a file.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::DEFAULT_CACHE_TTL;
use crate::domain::{PlatformType, UtilityType};
use crate::ports::EnvProvider;

/// Default bound on a single version probe.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

/// Argument passed to an executable to make it print its version.
pub const DEFAULT_VERSION_QUERY_ARG: &str = "--help";

const MIN_PROBE_TIMEOUT_MS: u64 = 100;
const MAX_PROBE_TIMEOUT_MS: u64 = 60_000;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SettingsError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Tunables for candidate search, probing and caching.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocatorSettings {
    /// Upper bound on one version probe, in milliseconds.
    pub probe_timeout_ms: Option<u64>,

    /// How long a resolution stays trusted, in seconds.
    pub cache_ttl_secs: Option<u64>,

    /// Argument used to make a utility print its version.
    pub version_query_arg: Option<String>,

    /// Extra directories searched before the installation roots.
    pub search_paths: Vec<String>,

    /// Installation roots replacing the platform defaults when non-empty.
    pub install_roots: Vec<String>,

    /// Explicit executable (or directory) per utility.
    pub overrides: BTreeMap<UtilityType, String>,
}

impl LocatorSettings {
    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply `IBTOOLS_*` environment variables on top of these settings.
    ///
    /// List variables use the platform's `PATH` separator and replace, not
    /// extend, the values they override.
    pub fn apply_env(
        &mut self,
        env: &dyn EnvProvider,
        platform: PlatformType,
    ) -> Result<(), SettingsError> {
        if let Some(raw) = env_string(env, "IBTOOLS_PROBE_TIMEOUT_MS") {
            self.probe_timeout_ms = Some(parse_u64("IBTOOLS_PROBE_TIMEOUT_MS", &raw)?);
        }
        if let Some(raw) = env_string(env, "IBTOOLS_CACHE_TTL_SECS") {
            self.cache_ttl_secs = Some(parse_u64("IBTOOLS_CACHE_TTL_SECS", &raw)?);
        }
        if let Some(raw) = env_string(env, "IBTOOLS_VERSION_ARG") {
            self.version_query_arg = Some(raw);
        }
        if let Some(raw) = env_string(env, "IBTOOLS_SEARCH_PATHS") {
            self.search_paths = split_list(&raw, platform);
        }
        if let Some(raw) = env_string(env, "IBTOOLS_INSTALL_ROOTS") {
            self.install_roots = split_list(&raw, platform);
        }
        Ok(())
    }

    pub fn effective_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.unwrap_or(DEFAULT_PROBE_TIMEOUT_MS))
    }

    pub fn effective_cache_ttl(&self) -> Duration {
        self.cache_ttl_secs
            .map_or(DEFAULT_CACHE_TTL, Duration::from_secs)
    }

    pub fn effective_version_query_arg(&self) -> &str {
        self.version_query_arg
            .as_deref()
            .unwrap_or(DEFAULT_VERSION_QUERY_ARG)
    }

    pub fn override_for(&self, utility: UtilityType) -> Option<&str> {
        self.overrides.get(&utility).map(String::as_str)
    }
}

/// Reject settings the locator cannot work with.
pub fn validate_settings(settings: &LocatorSettings) -> Result<(), SettingsError> {
    if let Some(ms) = settings.probe_timeout_ms {
        if !(MIN_PROBE_TIMEOUT_MS..=MAX_PROBE_TIMEOUT_MS).contains(&ms) {
            return Err(SettingsError::invalid(
                "probe_timeout_ms",
                format!("{ms} is outside {MIN_PROBE_TIMEOUT_MS}..={MAX_PROBE_TIMEOUT_MS}"),
            ));
        }
    }

    if settings.cache_ttl_secs == Some(0) {
        return Err(SettingsError::invalid("cache_ttl_secs", "must be greater than 0"));
    }

    if let Some(arg) = &settings.version_query_arg {
        if arg.trim().is_empty() {
            return Err(SettingsError::invalid("version_query_arg", "cannot be empty"));
        }
    }

    if let Some((utility, _)) = settings.overrides.iter().find(|(_, p)| p.trim().is_empty()) {
        return Err(SettingsError::invalid(
            "overrides",
            format!("override for {utility} is empty"),
        ));
    }

    Ok(())
}

fn env_string(env: &dyn EnvProvider, key: &str) -> Option<String> {
    env.get(key)
        .and_then(|v| v.into_string().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_u64(field: &'static str, raw: &str) -> Result<u64, SettingsError> {
    raw.parse()
        .map_err(|e| SettingsError::invalid(field, format!("'{raw}': {e}")))
}

fn split_list(raw: &str, platform: PlatformType) -> Vec<String> {
    raw.split(platform.path_separator())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
