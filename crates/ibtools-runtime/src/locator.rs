//! Cache-first utility resolution.

use std::sync::Arc;

use ibtools_core::{
    Attempt, AttemptOutcome, CandidateSource, PlatformType, ResolveReport, UtilPathCache,
    UtilityLocation, UtilityNotFound, UtilityType, UtilityValidator, VersionProbe,
    is_version_compatible,
};
use tracing::{debug, info, warn};

/// Resolves utilities to executables, consulting the cache first.
///
/// On a miss, candidates are taken in order from the [`CandidateSource`];
/// the first one that validates and satisfies the version constraint wins
/// and is stored under the requested key. Cache hits are returned without
/// touching the filesystem.
pub struct CrossPlatformUtilLocator {
    cache: Arc<UtilPathCache>,
    candidates: Arc<dyn CandidateSource>,
    validator: Arc<dyn UtilityValidator>,
    probe: Arc<dyn VersionProbe>,
    platform: PlatformType,
}

impl CrossPlatformUtilLocator {
    pub fn new(
        cache: Arc<UtilPathCache>,
        candidates: Arc<dyn CandidateSource>,
        validator: Arc<dyn UtilityValidator>,
        probe: Arc<dyn VersionProbe>,
    ) -> Self {
        Self {
            cache,
            candidates,
            validator,
            probe,
            platform: PlatformType::current(),
        }
    }

    /// Resolve for another platform than the running one.
    #[must_use]
    pub const fn with_platform(mut self, platform: PlatformType) -> Self {
        self.platform = platform;
        self
    }

    pub fn cache(&self) -> &Arc<UtilPathCache> {
        &self.cache
    }

    pub const fn platform(&self) -> PlatformType {
        self.platform
    }

    /// Locate `utility`, optionally constrained to a release line.
    pub async fn resolve(
        &self,
        utility: UtilityType,
        required_version: Option<&str>,
    ) -> Result<UtilityLocation, UtilityNotFound> {
        self.resolve_with_report(utility, required_version)
            .await
            .map(|report| report.location)
    }

    /// Like [`resolve`](Self::resolve), but also returns the attempts made.
    pub async fn resolve_with_report(
        &self,
        utility: UtilityType,
        required_version: Option<&str>,
    ) -> Result<ResolveReport, UtilityNotFound> {
        if let Some(location) = self.cache.get(utility, required_version) {
            debug!(utility = %utility, path = %location.path().display(), "Cache hit");
            return Ok(ResolveReport {
                location,
                attempts: Vec::new(),
                from_cache: true,
            });
        }

        let (location, attempts) = self.search(utility, required_version).await?;
        self.cache
            .store(utility, required_version, location.clone());

        Ok(ResolveReport {
            location,
            attempts,
            from_cache: false,
        })
    }

    /// Search again even if a live entry exists, then refresh the cache.
    pub async fn resolve_uncached(
        &self,
        utility: UtilityType,
        required_version: Option<&str>,
    ) -> Result<UtilityLocation, UtilityNotFound> {
        let (location, _) = self.search(utility, required_version).await?;
        self.cache
            .store(utility, required_version, location.clone());
        Ok(location)
    }

    async fn search(
        &self,
        utility: UtilityType,
        required_version: Option<&str>,
    ) -> Result<(UtilityLocation, Vec<Attempt>), UtilityNotFound> {
        let candidates = self
            .candidates
            .candidates(utility, self.platform, required_version);
        let mut attempts = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let outcome = self.validator.check(&candidate);
            if !outcome.is_ok() {
                debug!(candidate = %candidate.display(), outcome = %outcome, "Candidate rejected");
                attempts.push(Attempt::new(candidate, outcome));
                continue;
            }

            let detected = self.probe.extract_version(&candidate).await;

            if let Some(required) = required_version {
                if !is_version_compatible(detected.as_deref(), required) {
                    let detected = detected.unwrap_or_default();
                    debug!(
                        candidate = %candidate.display(),
                        detected = %detected,
                        required = %required,
                        "Candidate version is incompatible"
                    );
                    attempts.push(Attempt::new(
                        candidate,
                        AttemptOutcome::VersionMismatch { detected },
                    ));
                    continue;
                }
            }

            let location = UtilityLocation::new(candidate.clone(), detected, self.platform);
            attempts.push(Attempt::new(candidate, AttemptOutcome::Ok));
            info!(utility = %utility, location = %location, "Resolved utility");
            return Ok((location, attempts));
        }

        warn!(
            utility = %utility,
            required_version = required_version.unwrap_or("*"),
            tried = attempts.len(),
            "No usable candidate found"
        );
        Err(UtilityNotFound::new(
            utility,
            required_version.map(str::to_string),
            attempts,
        ))
    }
}

impl std::fmt::Debug for CrossPlatformUtilLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossPlatformUtilLocator")
            .field("cache", &self.cache)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}
