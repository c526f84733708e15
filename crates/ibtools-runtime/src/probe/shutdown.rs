//! Forced teardown for version query processes.
//!
//! On Unix every query runs as the leader of its own process group, so a
//! wrapper script and anything it started can be killed together.

use std::time::Duration;

use tokio::process::Child;
use tokio::time::timeout;
use tracing::{debug, warn};

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{Signal, killpg};
#[cfg(unix)]
use nix::unistd::Pid;

/// How long to wait for the kernel to report a killed child as exited.
const REAP_GRACE: Duration = Duration::from_millis(500);

/// The process group a spawned executable leads.
///
/// Dropping it SIGKILLs whatever is still in the group, so descendants are
/// cleaned up on every exit path, cancellation included. On Windows only the
/// direct child is tracked (through `kill_on_drop`).
#[derive(Debug)]
pub(crate) struct ProcessGroup {
    #[cfg_attr(not(unix), allow(dead_code))]
    pgid: Option<u32>,
}

impl ProcessGroup {
    /// Capture the group of a freshly spawned child, before it can be reaped.
    pub(crate) fn of(child: &Child) -> Self {
        Self { pgid: child.id() }
    }

    pub(crate) fn kill(&self) {
        #[cfg(unix)]
        {
            let Some(pgid) = self.pgid.and_then(|id| i32::try_from(id).ok()) else {
                return;
            };
            match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
                Ok(()) => debug!(pgid, "Killed process group"),
                // Group already empty.
                Err(Errno::ESRCH) => {}
                Err(e) => warn!(pgid, error = %e, "Failed to kill process group"),
            }
        }
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Kill a child together with its group, then reap the child.
///
/// The child only ever ran a `--help`-style query, so there is nothing to shut
/// down gracefully: everything gets SIGKILL (`TerminateProcess` on Windows)
/// straight away. Waiting is bounded by [`REAP_GRACE`]; if the child still
/// has not been reaped, `kill_on_drop` and tokio's orphan reaper take over
/// when the handle is dropped.
pub(crate) async fn terminate_child(child: &mut Child, group: &ProcessGroup) {
    group.kill();

    // Already exited and reaped: nothing left to wait for.
    if let Ok(Some(status)) = child.try_wait() {
        debug!(?status, "Probe process had already exited");
        return;
    }

    if let Err(e) = child.start_kill() {
        // InvalidInput means the child was reaped between the two calls.
        if e.kind() != std::io::ErrorKind::InvalidInput {
            warn!(error = %e, "Failed to kill probe process");
        }
    }

    match timeout(REAP_GRACE, child.wait()).await {
        Ok(Ok(status)) => debug!(?status, "Probe process reaped"),
        Ok(Err(e)) => warn!(error = %e, "Failed to reap probe process"),
        Err(_) => warn!(
            pid = child.id(),
            "Probe process not reaped within grace period"
        ),
    }
}
