//! Stopping the tracked UI server.

use tokio::time::sleep;
use tracing::{debug, info, warn};
use waqt_core::{ControlError, LifecycleError, ProcessAction};

use super::ServerManager;

/// A tracked UI server that was stopped and forgotten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopOutcome {
    pub pid: i64,
    pub forced: bool,
}

impl ServerManager {
    /// Stop the tracked UI server.
    ///
    /// # Strategy
    /// 1. Refuse if no verified server is tracked
    /// 2. Send the graceful (or, with `force`, immediate) stop primitive
    /// 3. Poll liveness within the stop budget
    /// 4. On exit, delete the state record
    /// 5. On timeout keep the record, since the process may still exist
    pub async fn stop(&self, force: bool) -> Result<StopOutcome, LifecycleError> {
        let status = self.status();
        let Some(pid) = status.pid.filter(|_| status.running) else {
            return Err(LifecycleError::NotRunning);
        };

        let action = ProcessAction::stop(force);
        info!(pid, ?action, "Stopping UI server");

        match self.control.send(pid, action) {
            Ok(()) => {}
            Err(ControlError::NoSuchProcess) => {
                debug!(pid, "Process exited before the stop request arrived");
            }
            Err(source) => return Err(LifecycleError::Signal { pid, source }),
        }

        if self.wait_for_exit(pid).await {
            if let Err(e) = self.store.delete() {
                warn!(
                    "UI server stopped but state file {} could not be removed: {}",
                    self.store.path().display(),
                    e
                );
            }
            info!(pid, "UI server stopped");
            return Ok(StopOutcome { pid, forced: force });
        }

        if force {
            Err(LifecycleError::ForceStopFailure { pid })
        } else {
            Err(LifecycleError::GracefulStopTimeout {
                pid,
                waited: self.timings.stop_budget(),
            })
        }
    }

    /// Poll until `pid` is gone or the attempts run out.
    async fn wait_for_exit(&self, pid: i64) -> bool {
        for _ in 0..self.timings.stop_poll_attempts {
            sleep(self.timings.stop_poll_interval).await;
            if !self.inspector.is_running(pid) {
                return true;
            }
        }
        false
    }
}
