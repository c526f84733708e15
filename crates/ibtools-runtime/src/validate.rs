//! Filesystem-backed executable validation.

use std::io;
use std::path::Path;

use ibtools_core::{AttemptOutcome, UtilityValidator};

/// Checks candidates against the real filesystem.
///
/// Symlinks are followed. On Unix a file needs at least one execute bit; on
/// Windows any regular file passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsUtilityValidator;

impl UtilityValidator for FsUtilityValidator {
    fn check(&self, path: &Path) -> AttemptOutcome {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => return outcome_for_error(&e),
        };

        if !metadata.is_file() {
            return AttemptOutcome::NotAFile;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return AttemptOutcome::NotExecutable;
            }
        }

        AttemptOutcome::Ok
    }
}

fn outcome_for_error(e: &io::Error) -> AttemptOutcome {
    match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => AttemptOutcome::NotFound,
        io::ErrorKind::PermissionDenied => AttemptOutcome::PermissionDenied,
        _ => AttemptOutcome::IoError(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_path() {
        let dir = tempdir().unwrap();
        let validator = FsUtilityValidator;
        assert_eq!(
            validator.check(&dir.path().join("ibcmd")),
            AttemptOutcome::NotFound
        );
        assert!(!validator.validate_utility(&dir.path().join("ibcmd")));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let validator = FsUtilityValidator;
        assert_eq!(validator.check(dir.path()), AttemptOutcome::NotAFile);
        assert!(!validator.validate_utility(dir.path()));
    }

    #[test]
    fn test_path_through_regular_file_is_not_found() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("1cv8");
        std::fs::write(&file, b"").unwrap();
        let outcome = FsUtilityValidator.check(&file.join("bin"));
        assert!(matches!(
            outcome,
            AttemptOutcome::NotFound | AttemptOutcome::IoError(_)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("ibcmd");
        std::fs::write(&path, b"#!/bin/sh\n").unwrap();

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert_eq!(
            FsUtilityValidator.check(&path),
            AttemptOutcome::NotExecutable
        );
        assert!(!FsUtilityValidator.validate_utility(&path));

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(FsUtilityValidator.check(&path), AttemptOutcome::Ok);
        assert!(FsUtilityValidator.validate_utility(&path));
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_execute_bit_is_enough() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("ibsrv");
        std::fs::write(&path, b"").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o700)).unwrap();
        assert!(FsUtilityValidator.validate_utility(&path));
    }
}
