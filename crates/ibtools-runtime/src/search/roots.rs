//! Default installation roots per platform.

use std::path::PathBuf;

use ibtools_core::{EnvProvider, PlatformType, UtilityType};

const WINDOWS_PROGRAM_FILES: &str = r"C:\Program Files";
const WINDOWS_PROGRAM_FILES_X86: &str = r"C:\Program Files (x86)";

/// Where the platform installer (or the EDT launcher) puts things by default.
///
/// Runtime roots contain one directory per installed version; EDT roots
/// contain one `1c-edt-*` directory per installed IDE build.
pub(crate) fn default_install_roots(
    utility: UtilityType,
    platform: PlatformType,
    env: &dyn EnvProvider,
) -> Vec<PathBuf> {
    match (platform, utility.is_platform_runtime()) {
        (PlatformType::Windows, true) => {
            let program_files_dir = program_files(env, "ProgramFiles", WINDOWS_PROGRAM_FILES);
            let program_files_x86_dir =
                program_files(env, "ProgramFiles(x86)", WINDOWS_PROGRAM_FILES_X86);
            vec![
                program_files_dir.join("1cv8"),
                program_files_x86_dir.join("1cv8"),
            ]
        }
        (PlatformType::Windows, false) => {
            let program_files_dir = program_files(env, "ProgramFiles", WINDOWS_PROGRAM_FILES);
            vec![program_files_dir.join("1C").join("1CE").join("components")]
        }
        (PlatformType::Linux, true) => vec![
            PathBuf::from("/opt/1cv8/x86_64"),
            PathBuf::from("/opt/1cv8/i386"),
            PathBuf::from("/opt/1C/v8.3/x86_64"),
        ],
        (PlatformType::Linux, false) => vec![PathBuf::from("/opt/1C/1CE/components")],
        (PlatformType::MacOs, true) => vec![
            PathBuf::from("/opt/1cv8"),
            PathBuf::from("/Applications/1cv8.localized"),
        ],
        (PlatformType::MacOs, false) => vec![PathBuf::from("/Applications/1C/1CE/components")],
    }
}

fn program_files(env: &dyn EnvProvider, key: &str, fallback: &str) -> PathBuf {
    env.get(key)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(fallback), PathBuf::from)
}
