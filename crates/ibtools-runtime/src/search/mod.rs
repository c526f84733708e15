//! Candidate enumeration for installed platform utilities.
//!
//! [`PlatformSearchStrategy`] is the default [`CandidateSource`]. It lists, in
//! priority order:
//!
//! 1. the `IBTOOLS_<UTIL>_PATH` environment override, then the configured
//!    override for the utility;
//! 2. configured search directories;
//! 3. version directories under the installation roots;
//! 4. every directory on `PATH`.
//!
//! Duplicates are dropped, keeping the first occurrence.

mod layout;
mod roots;

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use ibtools_core::{CandidateSource, EnvProvider, LocatorSettings, PlatformType, UtilityType};
use tracing::debug;

use layout::{edt_candidates, runtime_candidates};
use roots::default_install_roots;

/// Default, filesystem-aware candidate source.
#[derive(Clone)]
pub struct PlatformSearchStrategy {
    env: Arc<dyn EnvProvider>,
    search_paths: Vec<PathBuf>,
    install_roots: Vec<PathBuf>,
    overrides: BTreeMap<UtilityType, PathBuf>,
}

impl PlatformSearchStrategy {
    /// Strategy using platform default roots and no extra directories.
    pub fn new(env: Arc<dyn EnvProvider>) -> Self {
        Self {
            env,
            search_paths: Vec::new(),
            install_roots: Vec::new(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn from_settings(settings: &LocatorSettings, env: Arc<dyn EnvProvider>) -> Self {
        Self {
            env,
            search_paths: settings.search_paths.iter().map(PathBuf::from).collect(),
            install_roots: settings.install_roots.iter().map(PathBuf::from).collect(),
            overrides: settings
                .overrides
                .iter()
                .map(|(utility, path)| (*utility, PathBuf::from(path)))
                .collect(),
        }
    }

    #[must_use]
    pub fn with_search_paths(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the platform default installation roots.
    #[must_use]
    pub fn with_install_roots(mut self, roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.install_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_override(mut self, utility: UtilityType, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(utility, path.into());
        self
    }

    fn override_candidates(&self, utility: UtilityType, file_name: &str) -> Vec<PathBuf> {
        let from_env = self
            .env
            .get(&utility.override_env_var())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let from_settings = self.overrides.get(&utility).cloned();

        from_env
            .into_iter()
            .chain(from_settings)
            .map(|path| {
                if path.is_dir() {
                    path.join(file_name)
                } else {
                    path
                }
            })
            .collect()
    }

    fn install_candidates(
        &self,
        utility: UtilityType,
        platform: PlatformType,
        required_version: Option<&str>,
    ) -> Vec<PathBuf> {
        let roots = if self.install_roots.is_empty() {
            default_install_roots(utility, platform, self.env.as_ref())
        } else {
            self.install_roots.clone()
        };

        roots
            .iter()
            .flat_map(|root| {
                if utility.is_platform_runtime() {
                    runtime_candidates(root, utility, platform, required_version)
                } else {
                    edt_candidates(root, platform)
                }
            })
            .collect()
    }

    fn path_candidates(&self, platform: PlatformType, file_name: &str) -> Vec<PathBuf> {
        let Some(path_var) = self.env.get("PATH") else {
            return Vec::new();
        };

        // The host's own PATH may hold non-UTF-8 directories; keep them.
        let dirs: Vec<PathBuf> = if platform == PlatformType::current() {
            std::env::split_paths(&path_var).collect()
        } else {
            debug!(?platform, "Splitting PATH for a foreign platform");
            path_var
                .to_string_lossy()
                .split(platform.path_separator())
                .map(PathBuf::from)
                .collect()
        };

        dirs.into_iter()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(file_name))
            .collect()
    }
}

impl CandidateSource for PlatformSearchStrategy {
    fn candidates(
        &self,
        utility: UtilityType,
        platform: PlatformType,
        required_version: Option<&str>,
    ) -> Vec<PathBuf> {
        let file_name = utility.file_name(platform);

        let ordered = self
            .override_candidates(utility, &file_name)
            .into_iter()
            .chain(self.search_paths.iter().map(|dir| dir.join(&file_name)))
            .chain(self.install_candidates(utility, platform, required_version))
            .chain(self.path_candidates(platform, &file_name));

        let mut seen = HashSet::new();
        let candidates: Vec<PathBuf> = ordered.filter(|path| seen.insert(path.clone())).collect();

        debug!(
            utility = %utility,
            platform = %platform,
            count = candidates.len(),
            "Enumerated candidates"
        );
        candidates
    }
}

impl std::fmt::Debug for PlatformSearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformSearchStrategy")
            .field("search_paths", &self.search_paths)
            .field("install_roots", &self.install_roots)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}
