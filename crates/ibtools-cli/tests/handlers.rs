//! Handlers driven through the composition root.

use std::sync::Arc;

use ibtools_cli::{CliError, bootstrap, handlers};
use ibtools_core::testing::MockEnv;
use ibtools_core::{LocatorSettings, UtilityType};
use tempfile::TempDir;

fn settings_with_root(root: &TempDir) -> LocatorSettings {
    LocatorSettings {
        install_roots: vec![root.path().display().to_string()],
        probe_timeout_ms: Some(2000),
        ..LocatorSettings::default()
    }
}

#[tokio::test]
async fn test_resolve_not_found_maps_to_unavailable() {
    let root = TempDir::new().unwrap();
    let ctx = bootstrap(settings_with_root(&root), Arc::new(MockEnv::new()));

    let err = handlers::resolve::execute(&ctx, UtilityType::Ibcmd, Some("8.3.24.1"), false)
        .await
        .unwrap_err();

    let cli_err = err.downcast_ref::<CliError>().unwrap();
    assert!(matches!(cli_err, CliError::NotFound(_)));
    assert_eq!(cli_err.exit_code(), 69);
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_uses_configured_override() {
    use std::os::unix::fs::PermissionsExt;

    let root = TempDir::new().unwrap();
    let exe = root.path().join("ibcmd");
    std::fs::write(&exe, "#!/bin/sh\necho 'ibcmd 8.3.24.1548'\n").unwrap();
    std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

    let mut settings = settings_with_root(&root);
    settings
        .overrides
        .insert(UtilityType::Ibcmd, root.path().display().to_string());
    let ctx = bootstrap(settings, Arc::new(MockEnv::new()));

    handlers::resolve::execute(&ctx, UtilityType::Ibcmd, Some("8.3.24.1"), true)
        .await
        .unwrap();

    let cached = ctx.locator.cache().get(UtilityType::Ibcmd, Some("8.3.24.1"));
    assert_eq!(cached.map(|loc| loc.path().to_path_buf()), Some(exe));
}

#[test]
fn test_candidates_and_platform_do_not_fail() {
    let root = TempDir::new().unwrap();
    let ctx = bootstrap(settings_with_root(&root), Arc::new(MockEnv::new()));

    handlers::candidates::execute(&ctx, UtilityType::EdtCli, None).unwrap();
    handlers::platform::execute().unwrap();
}
