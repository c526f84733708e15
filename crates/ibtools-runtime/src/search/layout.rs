//! Installation directory layouts.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use ibtools_core::{PlatformType, UtilityType, compare_versions};
use tracing::debug;

const EDT_COMPONENT_PREFIX: &str = "1c-edt-";

/// Executables inside a runtime root, one per version directory.
///
/// The directory named exactly like `required_version` comes first, the rest
/// follow newest first.
pub(crate) fn runtime_candidates(
    root: &Path,
    utility: UtilityType,
    platform: PlatformType,
    required_version: Option<&str>,
) -> Vec<PathBuf> {
    let mut versions: Vec<String> = subdirectories(root)
        .into_iter()
        .filter(|name| looks_like_version(name))
        .collect();

    versions.sort_by(|a, b| {
        let a_exact = required_version == Some(a.as_str());
        let b_exact = required_version == Some(b.as_str());
        match (a_exact, b_exact) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => compare_versions(b, a),
        }
    });

    let file_name = utility.file_name(platform);
    versions
        .into_iter()
        .map(|version| {
            let dir = root.join(version);
            match platform {
                PlatformType::Windows => dir.join("bin").join(&file_name),
                PlatformType::Linux | PlatformType::MacOs => dir.join(&file_name),
            }
        })
        .collect()
}

/// Executables inside an EDT components root, newest build first.
pub(crate) fn edt_candidates(root: &Path, platform: PlatformType) -> Vec<PathBuf> {
    let mut components: Vec<String> = subdirectories(root)
        .into_iter()
        .filter(|name| name.starts_with(EDT_COMPONENT_PREFIX))
        .collect();
    components.sort_by(|a, b| b.cmp(a));

    let file_name = UtilityType::EdtCli.file_name(platform);
    components
        .into_iter()
        .map(|component| root.join(component).join(&file_name))
        .collect()
}

fn looks_like_version(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_digit())
}

// Unreadable or missing roots contribute nothing.
fn subdirectories(root: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(root = %root.display(), error = %e, "Skipping unreadable install root");
            return Vec::new();
        }
    };

    entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}
