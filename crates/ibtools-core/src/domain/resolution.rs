//! Resolution attempts, reports and the not-found outcome.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::location::UtilityLocation;
use super::utility::UtilityType;

/// A single candidate that was considered during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// The path that was checked.
    pub candidate: PathBuf,
    /// What happened to it.
    pub outcome: AttemptOutcome,
}

impl Attempt {
    pub fn new(candidate: impl Into<PathBuf>, outcome: AttemptOutcome) -> Self {
        Self {
            candidate: candidate.into(),
            outcome,
        }
    }
}

/// Possible outcomes when checking a candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// File exists and is executable.
    Ok,
    /// Path does not exist.
    NotFound,
    /// Path exists but is not a regular file.
    NotAFile,
    /// File exists but carries no execute permission.
    NotExecutable,
    /// Metadata could not be read due to permissions.
    PermissionDenied,
    /// Other I/O error while checking the path.
    IoError(String),
    /// Executable is valid but its version does not satisfy the requirement.
    VersionMismatch { detected: String },
}

impl AttemptOutcome {
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NotFound => write!(f, "not found"),
            Self::NotAFile => write!(f, "not a file"),
            Self::NotExecutable => write!(f, "not executable"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IoError(msg) => write!(f, "I/O error: {msg}"),
            Self::VersionMismatch { detected } => {
                write!(f, "incompatible version {detected}")
            }
        }
    }
}

/// Successful resolution together with how it was reached.
#[derive(Debug, Clone)]
pub struct ResolveReport {
    pub location: UtilityLocation,
    /// Candidates checked before the winner, including the winner itself.
    /// Empty when the result came from the cache.
    pub attempts: Vec<Attempt>,
    pub from_cache: bool,
}

/// No candidate satisfied the utility and version constraint.
///
/// This is the only failure the locator surfaces. It carries enough context
/// to print an actionable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_not_found(self))]
pub struct UtilityNotFound {
    pub utility: UtilityType,
    pub required_version: Option<String>,
    pub attempts: Vec<Attempt>,
}

impl UtilityNotFound {
    pub fn new(
        utility: UtilityType,
        required_version: Option<String>,
        attempts: Vec<Attempt>,
    ) -> Self {
        Self {
            utility,
            required_version,
            attempts,
        }
    }

    /// Suggestion shown to the user after the attempt list.
    pub fn hint(&self) -> String {
        let install = match (&self.required_version, self.utility.is_platform_runtime()) {
            (Some(version), true) => format!("install platform version {version}"),
            (None, true) => "install the platform".to_string(),
            (Some(version), false) => format!("install EDT providing version {version}"),
            (None, false) => "install EDT".to_string(),
        };
        format!(
            "{install} or set {} to the executable path",
            self.utility.override_env_var()
        )
    }
}

fn render_not_found(err: &UtilityNotFound) -> String {
    let constraint = err
        .required_version
        .as_deref()
        .map_or_else(|| "any version".to_string(), |v| format!("version {v}"));
    let attempts = if err.attempts.is_empty() {
        "  (no candidates checked)".to_string()
    } else {
        err.attempts
            .iter()
            .map(|a| format!("  ✗ {}: {}", a.candidate.display(), a.outcome))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "Could not locate '{}' ({constraint}). Tried:\n{attempts}\n\nHint: {}",
        err.utility,
        err.hint()
    )
}
