//! CLI bootstrap - the composition root.
//!
//! Settings are loaded here and every concrete adapter is instantiated once:
//! the path cache, the process probe, the filesystem validator, the search
//! strategy and the locator that ties them together. Handlers only see the
//! resulting [`CliContext`].

use std::path::Path;
use std::sync::Arc;

use ibtools_core::{EnvProvider, LocatorSettings, PlatformType, UtilPathCache, validate_settings};
use ibtools_runtime::{
    CrossPlatformUtilLocator, FsUtilityValidator, PlatformSearchStrategy, ProcessVersionProbe,
};
use tracing::debug;

use crate::error::CliError;

/// Fully composed dependencies for CLI commands.
pub struct CliContext {
    pub settings: LocatorSettings,
    pub locator: CrossPlatformUtilLocator,
    /// Candidate enumeration, exposed for the `candidates` command.
    pub strategy: Arc<PlatformSearchStrategy>,
    pub validator: Arc<FsUtilityValidator>,
    pub probe: Arc<ProcessVersionProbe>,
}

/// Load settings from an optional JSON file, then the environment.
pub fn load_settings(
    config: Option<&Path>,
    env: &dyn EnvProvider,
    platform: PlatformType,
) -> Result<LocatorSettings, CliError> {
    let mut settings = match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
            LocatorSettings::from_json(&raw)?
        }
        None => LocatorSettings::default(),
    };

    settings.apply_env(env, platform)?;
    validate_settings(&settings)?;
    debug!(?settings, "Loaded locator settings");
    Ok(settings)
}

/// Wire the locator and its adapters from validated settings.
pub fn bootstrap(settings: LocatorSettings, env: Arc<dyn EnvProvider>) -> CliContext {
    let cache = Arc::new(UtilPathCache::with_ttl(settings.effective_cache_ttl()));
    let probe = Arc::new(ProcessVersionProbe::from_settings(&settings));
    let validator = Arc::new(FsUtilityValidator);
    let strategy = Arc::new(PlatformSearchStrategy::from_settings(&settings, env));

    let locator = CrossPlatformUtilLocator::new(
        cache,
        strategy.clone(),
        validator.clone(),
        probe.clone(),
    );

    CliContext {
        settings,
        locator,
        strategy,
        validator,
        probe,
    }
}
