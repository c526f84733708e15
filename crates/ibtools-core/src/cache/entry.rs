//! Cache keys and stored entries.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::domain::{UtilityLocation, UtilityType};

/// Lookup key: the utility plus the exact version string that was requested.
///
/// `None` (any version) is its own key and never matches a concrete version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub utility: UtilityType,
    pub version: Option<String>,
}

impl CacheKey {
    pub fn new(utility: UtilityType, version: Option<&str>) -> Self {
        Self {
            utility,
            version: version.map(str::to_string),
        }
    }
}

/// A stored resolution with its creation time and fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEntry {
    pub location: UtilityLocation,
    pub created_at: DateTime<Utc>,
    /// Hex SHA-256 over the location's path, version and platform.
    pub fingerprint: String,
}

impl CachedEntry {
    pub fn new(location: UtilityLocation, created_at: DateTime<Utc>) -> Self {
        let fingerprint = fingerprint(&location);
        Self {
            location,
            created_at,
            fingerprint,
        }
    }

    /// Whether the entry is at least `ttl` old at `now`.
    ///
    /// A clock that moved backwards makes the entry look brand new.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now
            .signed_duration_since(self.created_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        age >= ttl
    }

    /// Whether `location` is the same resolution this entry was built from.
    pub fn matches(&self, location: &UtilityLocation) -> bool {
        self.fingerprint == fingerprint(location)
    }
}

/// Fingerprint a location. Pure: the file itself is never read.
pub fn fingerprint(location: &UtilityLocation) -> String {
    let mut hasher = Sha256::new();
    hasher.update(location.path().as_os_str().as_encoded_bytes());
    hasher.update([0]);
    hasher.update(location.version().unwrap_or_default().as_bytes());
    hasher.update([0]);
    hasher.update(location.platform().display_name().as_bytes());
    format!("{:x}", hasher.finalize())
}
