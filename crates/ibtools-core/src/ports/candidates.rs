//! Candidate enumeration port.

use std::path::PathBuf;

use crate::domain::{PlatformType, UtilityType};

/// Produces the ordered list of paths where a utility might live.
///
/// The order is a priority: the locator accepts the first candidate that
/// validates and satisfies the version constraint. Implementations must be
/// deterministic for a given environment.
pub trait CandidateSource: Send + Sync {
    fn candidates(
        &self,
        utility: UtilityType,
        platform: PlatformType,
        required_version: Option<&str>,
    ) -> Vec<PathBuf>;
}
