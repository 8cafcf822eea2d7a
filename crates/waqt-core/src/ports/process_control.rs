//! Process signalling capability.

use thiserror::Error;

/// Logical actions the lifecycle manager performs on a process.
///
/// Each platform maps these to its own primitive (a Unix signal, a
/// `tasklist`/`taskkill` invocation on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessAction {
    /// Probe for existence without affecting the process.
    CheckAlive,
    /// Ask the process to shut down cleanly.
    GracefulStop,
    /// Terminate the process immediately.
    ForceStop,
}

impl ProcessAction {
    /// The stop action matching a `--force` flag.
    pub const fn stop(force: bool) -> Self {
        if force {
            Self::ForceStop
        } else {
            Self::GracefulStop
        }
    }
}

/// Why a [`ProcessControl`] request failed.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The target process does not exist (already exited).
    #[error("no such process")]
    NoSuchProcess,

    /// The caller lacks permission to signal the target.
    #[error("permission denied")]
    PermissionDenied,

    /// Anything else the platform reported.
    #[error("{0}")]
    Failed(String),
}

/// Sends lifecycle actions to OS processes.
pub trait ProcessControl: Send + Sync {
    fn send(&self, pid: i64, action: ProcessAction) -> Result<(), ControlError>;
}
