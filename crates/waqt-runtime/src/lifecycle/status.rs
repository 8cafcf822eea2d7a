//! Status reporting with stale-state healing.

use tracing::{debug, info, warn};
use waqt_core::ServerStatus;

use super::ServerManager;

impl ServerManager {
    /// Report whether the tracked UI server is running.
    ///
    /// # Strategy
    /// 1. No record → not running
    /// 2. Record without a PID → delete it, not running
    /// 3. PID not alive → delete record, stale
    /// 4. PID alive but not ours (reused) → delete record, stale
    /// 5. Otherwise running with the recorded host/port/start time
    pub fn status(&self) -> ServerStatus {
        let Some(state) = self.store.read() else {
            debug!("No UI server state recorded");
            return ServerStatus::not_running();
        };

        let Some(pid) = state.pid else {
            warn!("UI server state has no PID, removing it");
            self.discard_state();
            return ServerStatus::not_running();
        };

        if !self.inspector.is_running(pid) {
            info!(pid, "Tracked UI server is no longer running, removing stale state");
            self.discard_state();
            return ServerStatus::stale();
        }

        if !self.inspector.is_ours(pid, &state) {
            warn!(
                pid,
                inspector = self.inspector.name(),
                "PID is alive but not verified as the UI server (reused PID?), removing stale state"
            );
            self.discard_state();
            return ServerStatus::stale();
        }

        ServerStatus::running(pid, &state)
    }

    fn discard_state(&self) {
        if let Err(e) = self.store.delete() {
            warn!(
                "Failed to remove stale state file {}: {}",
                self.store.path().display(),
                e
            );
        }
    }
}
