//! Version probing by running the candidate executable.
//!
//! The candidate is started with a single query argument and its output is
//! scanned for a four-part version. The whole probe (spawn, run, read) is
//! bounded by a timeout; on expiry the process and its descendants are killed
//! and the version is taken from whatever output was captured before that.

mod shutdown;

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use ibtools_core::settings::{DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_VERSION_QUERY_ARG};
use ibtools_core::{LocatorSettings, VersionProbe, extract_version_token};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::time::{Instant, timeout};
use tracing::debug;

use shutdown::{ProcessGroup, terminate_child};

/// How long to keep reading after the process exited while a descendant
/// still holds its output pipes open.
const DRAIN_GRACE: Duration = Duration::from_millis(100);

/// Detailed result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The output contained a version token.
    Version(String),
    /// The process finished but printed no version token.
    NoVersion,
    /// The timeout elapsed; the process was killed.
    TimedOut,
    /// The executable could not be started.
    SpawnFailed(String),
    /// Reading output or waiting for the process failed.
    Failed(String),
}

impl ProbeOutcome {
    pub fn into_version(self) -> Option<String> {
        match self {
            Self::Version(version) => Some(version),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(version) => write!(f, "{version}"),
            Self::NoVersion => write!(f, "unknown (no version in output)"),
            Self::TimedOut => write!(f, "unknown (timed out)"),
            Self::SpawnFailed(reason) => write!(f, "unknown (failed to start: {reason})"),
            Self::Failed(reason) => write!(f, "unknown ({reason})"),
        }
    }
}

/// [`VersionProbe`] that launches the executable under a timeout.
#[derive(Debug, Clone)]
pub struct ProcessVersionProbe {
    timeout: Duration,
    query_arg: String,
}

impl ProcessVersionProbe {
    /// Probe with `--help` and a 3 second bound.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            query_arg: DEFAULT_VERSION_QUERY_ARG.to_string(),
        }
    }

    pub fn from_settings(settings: &LocatorSettings) -> Self {
        Self {
            timeout: settings.effective_probe_timeout(),
            query_arg: settings.effective_version_query_arg().to_string(),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_query_arg(mut self, arg: impl Into<String>) -> Self {
        self.query_arg = arg.into();
        self
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the probe and report exactly what happened.
    pub async fn probe(&self, executable: &Path) -> ProbeOutcome {
        let started = Instant::now();

        let mut cmd = Command::new(executable);
        cmd.arg(&self.query_arg)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the probe future (task cancellation) must not leak the process.
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => return ProbeOutcome::SpawnFailed(e.to_string()),
        };
        // Kills anything the executable left behind on return.
        let group = ProcessGroup::of(&child);

        let mut output = ProbeOutput::default();
        let remaining = self.timeout.saturating_sub(started.elapsed());
        let collected = timeout(remaining, collect_output(&mut child, &mut output)).await;

        let fallback = match collected {
            Ok(Ok(())) => ProbeOutcome::NoVersion,
            Ok(Err(e)) => {
                terminate_child(&mut child, &group).await;
                ProbeOutcome::Failed(e.to_string())
            }
            Err(_) => {
                terminate_child(&mut child, &group).await;
                ProbeOutcome::TimedOut
            }
        };
        output.version().map_or(fallback, ProbeOutcome::Version)
    }
}

impl Default for ProcessVersionProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionProbe for ProcessVersionProbe {
    async fn extract_version(&self, executable: &Path) -> Option<String> {
        let outcome = self.probe(executable).await;
        debug!(
            path = %executable.display(),
            outcome = %outcome,
            "Version probe finished"
        );
        outcome.into_version()
    }
}

/// Captured output, complete or not.
#[derive(Debug, Default)]
struct ProbeOutput {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl ProbeOutput {
    // Exit status is ignored: many tools exit non-zero after printing help.
    fn version(&self) -> Option<String> {
        [&self.stdout, &self.stderr].into_iter().find_map(|bytes| {
            let text = String::from_utf8_lossy(bytes);
            extract_version_token(&text).map(str::to_string)
        })
    }
}

/// Read both pipes into `output` until EOF and wait for the process.
///
/// Bytes land in `output` as they arrive, so a caller that gives up early
/// still sees everything read so far. If the process exits while a
/// descendant keeps the pipes open, reading stops after [`DRAIN_GRACE`].
async fn collect_output(child: &mut Child, output: &mut ProbeOutput) -> io::Result<()> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let drain = async {
        tokio::try_join!(
            drain_stream(stdout, &mut output.stdout),
            drain_stream(stderr, &mut output.stderr)
        )
    };
    tokio::pin!(drain);

    tokio::select! {
        drained = &mut drain => {
            drained?;
            child.wait().await?;
        }
        status = child.wait() => {
            let status = status?;
            match timeout(DRAIN_GRACE, &mut drain).await {
                Ok(drained) => {
                    drained?;
                }
                Err(_) => debug!(?status, "Output pipes still open after exit, stop reading"),
            }
        }
    }
    Ok(())
}

async fn drain_stream<R: AsyncRead + Unpin>(
    stream: Option<R>,
    buf: &mut Vec<u8>,
) -> io::Result<()> {
    let Some(mut stream) = stream else {
        return Ok(());
    };
    // read_buf is cancel safe, so nothing is lost when the caller stops early.
    while stream.read_buf(buf).await? > 0 {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_prefers_stdout() {
        let output = ProbeOutput {
            stdout: b"1C:Enterprise 8.3.24.1548".to_vec(),
            stderr: b"warning 8.3.22.1".to_vec(),
        };
        assert_eq!(output.version(), Some("8.3.24.1548".to_string()));
    }

    #[test]
    fn test_output_falls_back_to_stderr() {
        let output = ProbeOutput {
            stdout: b"Usage: ibcmd <command>".to_vec(),
            stderr: b"ibcmd 8.3.23.1912".to_vec(),
        };
        assert_eq!(output.version(), Some("8.3.23.1912".to_string()));
    }

    #[test]
    fn test_output_without_token() {
        let output = ProbeOutput {
            stdout: b"Usage".to_vec(),
            stderr: Vec::new(),
        };
        assert_eq!(output.version(), None);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(ProbeOutcome::Version("8.3.24.1".into()).to_string(), "8.3.24.1");
        assert_eq!(ProbeOutcome::TimedOut.to_string(), "unknown (timed out)");
        assert_eq!(ProbeOutcome::NoVersion.into_version(), None);
    }

    #[tokio::test]
    async fn test_missing_executable_is_spawn_failure() {
        let probe = ProcessVersionProbe::new();
        let outcome = probe.probe(Path::new("/nonexistent/ibtools/ibcmd")).await;
        assert!(matches!(outcome, ProbeOutcome::SpawnFailed(_)));
        assert_eq!(
            probe
                .extract_version(Path::new("/nonexistent/ibtools/ibcmd"))
                .await,
            None
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = LocatorSettings {
            probe_timeout_ms: Some(750),
            version_query_arg: Some("/?".to_string()),
            ..LocatorSettings::default()
        };
        let probe = ProcessVersionProbe::from_settings(&settings);
        assert_eq!(probe.timeout(), Duration::from_millis(750));
        assert_eq!(probe.query_arg, "/?");
    }
}
