//! Port definitions (traits and errors) for process lifecycle management.
//!
//! Implementations live in `waqt-runtime`. Keeping the traits here lets the
//! lifecycle logic be exercised against test doubles without touching real
//! processes.

mod process_control;
mod process_inspector;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub use process_control::{ControlError, ProcessAction, ProcessControl};
pub use process_inspector::ProcessInspector;

/// Errors surfaced by starting and stopping the managed UI server.
///
/// Stale state has no variant: it is healed silently and only
/// reported through [`crate::ServerStatus::was_stale`].
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A verified server is already tracked for this data directory.
    #[error("UI server is already running (PID {pid})")]
    AlreadyRunning { pid: i64 },

    /// Something else holds the requested address.
    #[error("Port {port} on {host} is already in use")]
    PortInUse { host: String, port: u16 },

    /// The child exited before startup was confirmed.
    #[error("UI server exited during startup ({detail}); check the log at {}", log_path.display())]
    SpawnFailure { log_path: PathBuf, detail: String },

    /// No verified server is tracked.
    #[error("UI server is not running")]
    NotRunning,

    /// SIGTERM (or `taskkill`) was sent but the process outlived the poll budget.
    #[error(
        "UI server (PID {pid}) did not stop within {waited:?}; retry, or use --force to kill it"
    )]
    GracefulStopTimeout { pid: i64, waited: Duration },

    /// The immediate-kill primitive was sent but the process is still alive.
    #[error("UI server (PID {pid}) is still alive after a forced stop; it may be unkillable")]
    ForceStopFailure { pid: i64 },

    /// The OS rejected the termination request.
    #[error("Failed to signal process {pid}: {source}")]
    Signal {
        pid: i64,
        #[source]
        source: ControlError,
    },

    /// The child process could not be created at all.
    #[error("Failed to launch UI server: {0}")]
    Launch(#[source] io::Error),

    /// The state file could not be written after a successful launch.
    #[error("Failed to record UI server state: {0}")]
    State(#[source] io::Error),
}
