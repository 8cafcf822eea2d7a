//! Fallback inspector built from platform primitives only.

use std::sync::Arc;

use tracing::debug;
use waqt_core::{ControlError, ManagedProcessState, ProcessAction, ProcessControl, ProcessInspector};

use super::port::PortProbe;

/// Inspector used when no process table is available.
///
/// Liveness uses the platform `CheckAlive` primitive. Command lines cannot be
/// read, so identity is a composite check: the PID must be the recorded one,
/// it must be alive, and the recorded port must be bound. Any failure rejects.
pub struct MinimalInspector {
    control: Arc<dyn ProcessControl>,
    ports: PortProbe,
}

impl MinimalInspector {
    pub fn new(control: Arc<dyn ProcessControl>, ports: PortProbe) -> Self {
        Self { control, ports }
    }
}

impl ProcessInspector for MinimalInspector {
    fn name(&self) -> &'static str {
        "minimal"
    }

    fn is_running(&self, pid: i64) -> bool {
        if pid <= 0 {
            return false;
        }

        let exists = match self.control.send(pid, ProcessAction::CheckAlive) {
            Ok(()) => true,
            Err(ControlError::NoSuchProcess) => false,
            // Process exists but we lack permission
            Err(ControlError::PermissionDenied) => true,
            Err(e) => {
                debug!(pid, "Liveness check failed: {}", e);
                false
            }
        };

        exists && !is_zombie(pid)
    }

    fn is_ours(&self, pid: i64, claim: &ManagedProcessState) -> bool {
        if claim.pid != Some(pid) {
            debug!(pid, recorded = ?claim.pid, "PID does not match the recorded one");
            return false;
        }
        if !self.is_running(pid) {
            return false;
        }
        if !self.ports.is_in_use(&claim.host, claim.port) {
            debug!(pid, port = claim.port, "Recorded port is not bound, rejecting identity");
            return false;
        }
        true
    }
}

/// Exited-but-unreaped processes still answer the null signal.
#[cfg(target_os = "linux")]
fn is_zombie(pid: i64) -> bool {
    let Ok(stat) = std::fs::read_to_string(format!("/proc/{pid}/stat")) else {
        return false;
    };
    // Format: "<pid> (<comm>) <state> ..." where comm may contain spaces or ')'
    stat.rsplit_once(')')
        .and_then(|(_, rest)| rest.trim_start().chars().next())
        .is_some_and(|state| state == 'Z')
}

#[cfg(not(target_os = "linux"))]
const fn is_zombie(_pid: i64) -> bool {
    false
}
