//! Core of the platform utility resolution engine.
//!
//! Pure domain types, the version compatibility policy, the TTL path cache
//! and the ports implemented by `ibtools-runtime`. Nothing in this crate
//! spawns processes or inspects the filesystem.

#![deny(unused_crate_dependencies)]

pub mod cache;
pub mod domain;
pub mod ports;
pub mod settings;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod version;

// Re-export commonly used types for convenience
pub use cache::{CacheKey, CacheStats, CachedEntry, Clock, SystemClock, UtilPathCache};
pub use domain::{
    Attempt, AttemptOutcome, ParseUtilityError, PlatformType, ResolveReport, UtilityLocation,
    UtilityNotFound, UtilityType,
};
pub use ports::{CandidateSource, EnvProvider, SystemEnv, UtilityValidator, VersionProbe};
pub use settings::{LocatorSettings, SettingsError, validate_settings};
pub use version::{compare_versions, extract_version_token, is_version_compatible};

#[cfg(test)]
use tokio as _;
