//! Version probing against real processes.
//!
//! Executables are small shell scripts written into a temporary directory.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ibtools_core::VersionProbe;
use ibtools_runtime::{ProbeOutcome, ProcessVersionProbe};
use tempfile::TempDir;
use tokio::time::Instant;

fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A killed process that nobody has reaped yet counts as dead.
fn pid_alive(pid: &str) -> bool {
    if let Ok(stat) = std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        let state = stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.split_whitespace().next());
        return !matches!(state, Some("Z" | "X"));
    }
    std::process::Command::new("kill")
        .args(["-0", pid])
        .stderr(std::process::Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Killing is asynchronous from the caller's point of view; allow a moment.
async fn wait_until_dead(pid: &str) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if !pid_alive(pid) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    !pid_alive(pid)
}

#[tokio::test]
async fn test_version_on_stdout() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "ibcmd",
        r#"echo "1C:Enterprise 8.3 (x86-64) version 8.3.24.1548""#,
    );

    let version = ProcessVersionProbe::new().extract_version(&script).await;
    assert_eq!(version.as_deref(), Some("8.3.24.1548"));
}

#[tokio::test]
async fn test_version_on_stderr_with_failing_exit_code() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "ibsrv",
        "echo 'unknown option' \necho 'ibsrv 8.3.23.1912' >&2\nexit 3",
    );

    let outcome = ProcessVersionProbe::new().probe(&script).await;
    assert_eq!(outcome, ProbeOutcome::Version("8.3.23.1912".to_string()));
}

#[tokio::test]
async fn test_output_without_version() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "1cv8c", "echo 'Usage: 1cv8c [options]'");

    let probe = ProcessVersionProbe::new();
    assert_eq!(probe.probe(&script).await, ProbeOutcome::NoVersion);
    assert_eq!(probe.extract_version(&script).await, None);
}

#[tokio::test]
async fn test_query_argument_is_passed() {
    let dir = TempDir::new().unwrap();
    let script = write_script(
        &dir,
        "1cedtcli",
        r#"if [ "$1" = "-version" ]; then echo "1C:EDT 2024.1.2.3"; fi"#,
    );

    let default_probe = ProcessVersionProbe::new();
    assert_eq!(default_probe.extract_version(&script).await, None);

    let probe = ProcessVersionProbe::new().with_query_arg("-version");
    assert_eq!(
        probe.extract_version(&script).await.as_deref(),
        Some("2024.1.2.3")
    );
}

#[tokio::test]
async fn test_missing_executable() {
    let outcome = ProcessVersionProbe::new()
        .probe(Path::new("/nonexistent/1cv8/ibcmd"))
        .await;
    assert!(matches!(outcome, ProbeOutcome::SpawnFailed(_)));
}

#[tokio::test]
async fn test_hanging_process_is_killed_after_timeout() {
    let dir = TempDir::new().unwrap();
    let pid_file = dir.path().join("pid");
    let script = write_script(
        &dir,
        "designer",
        &format!("echo $$ > '{}'\nexec sleep 30", pid_file.display()),
    );

    let timeout = Duration::from_millis(500);
    let probe = ProcessVersionProbe::new().with_timeout(timeout);

    let started = Instant::now();
    let outcome = probe.probe(&script).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, ProbeOutcome::TimedOut);
    assert!(
        elapsed < timeout + Duration::from_secs(2),
        "probe took {elapsed:?}"
    );

    let pid = std::fs::read_to_string(&pid_file).unwrap();
    assert!(!pid_alive(pid.trim()), "probe process {pid} still running");
}

#[tokio::test]
async fn test_background_children_are_killed_after_timeout() {
    let dir = TempDir::new().unwrap();
    let pid_file = dir.path().join("child-pid");
    let script = write_script(
        &dir,
        "ragent",
        &format!("sleep 30 &\necho $! > '{}'\nwait", pid_file.display()),
    );

    let probe = ProcessVersionProbe::new().with_timeout(Duration::from_millis(500));
    assert_eq!(probe.probe(&script).await, ProbeOutcome::TimedOut);

    let pid = std::fs::read_to_string(&pid_file).unwrap();
    assert!(
        wait_until_dead(pid.trim()).await,
        "background process {pid} survived the timeout"
    );
}

#[tokio::test]
async fn test_version_kept_when_background_child_holds_stdout() {
    let dir = TempDir::new().unwrap();
    let pid_file = dir.path().join("child-pid");
    let script = write_script(
        &dir,
        "ibsrv",
        &format!(
            "echo 'ibsrv 8.3.24.1548'\nsleep 30 &\necho $! > '{}'\nexit 0",
            pid_file.display()
        ),
    );

    let timeout = Duration::from_secs(5);
    let probe = ProcessVersionProbe::new().with_timeout(timeout);

    let started = Instant::now();
    let outcome = probe.probe(&script).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, ProbeOutcome::Version("8.3.24.1548".to_string()));
    assert!(elapsed < Duration::from_secs(2), "lookup took {elapsed:?}");

    let pid = std::fs::read_to_string(&pid_file).unwrap();
    assert!(
        wait_until_dead(pid.trim()).await,
        "background process {pid} outlived the lookup"
    );
}

#[tokio::test]
async fn test_version_printed_before_hang_survives_timeout() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "1cv8", "echo '1C:Enterprise 8.3.22.2355'\nexec sleep 30");

    let probe = ProcessVersionProbe::new().with_timeout(Duration::from_millis(500));
    assert_eq!(
        probe.probe(&script).await,
        ProbeOutcome::Version("8.3.22.2355".to_string())
    );
}
