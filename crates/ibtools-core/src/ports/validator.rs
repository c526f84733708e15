//! Executable validity checks.

use std::path::Path;

use crate::domain::AttemptOutcome;

/// Decides whether a candidate path is a usable executable.
///
/// Implementations must never execute the file and never panic; every
/// problem is reported as an [`AttemptOutcome`].
pub trait UtilityValidator: Send + Sync {
    /// Classify the candidate.
    fn check(&self, path: &Path) -> AttemptOutcome;

    /// `true` only for an existing, regular, executable file.
    fn validate_utility(&self, path: &Path) -> bool {
        self.check(path).is_ok()
    }
}
