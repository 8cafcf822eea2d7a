//! The persisted claim about the managed server, and the status derived from it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record persisted in `waqt_server.json` describing the managed UI server.
///
/// This is a *claim*, not a guarantee: the PID may have been reused by an
/// unrelated process since the record was written. Anything acting on the
/// record must re-verify liveness and identity first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedProcessState {
    /// OS process identifier of the spawned server.
    ///
    /// Optional on read so that a damaged record still parses and can be
    /// cleaned up instead of lingering forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    /// Host the server was asked to bind.
    pub host: String,
    /// Port the server was asked to bind.
    pub port: u16,
    /// When the server was launched.
    pub started_at: DateTime<Utc>,
}

impl ManagedProcessState {
    /// Create a record for a freshly spawned process, stamped with the current time.
    pub fn new(pid: i64, host: impl Into<String>, port: u16) -> Self {
        Self {
            pid: Some(pid),
            host: host.into(),
            port,
            started_at: Utc::now(),
        }
    }
}

/// Answer to "is the managed server running?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerStatus {
    pub running: bool,
    pub pid: Option<i64>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub started_at: Option<DateTime<Utc>>,
    /// True when a state record existed but described a dead or foreign
    /// process and was removed while answering.
    pub was_stale: bool,
}

impl ServerStatus {
    /// No server is tracked.
    pub const fn not_running() -> Self {
        Self {
            running: false,
            pid: None,
            host: None,
            port: None,
            started_at: None,
            was_stale: false,
        }
    }

    /// A state record existed but was stale and has been cleaned up.
    pub fn stale() -> Self {
        Self {
            was_stale: true,
            ..Self::not_running()
        }
    }

    /// The tracked process was verified alive and ours.
    pub fn running(pid: i64, state: &ManagedProcessState) -> Self {
        Self {
            running: true,
            pid: Some(pid),
            host: Some(state.host.clone()),
            port: Some(state.port),
            started_at: Some(state.started_at),
            was_stale: false,
        }
    }

    /// Time elapsed since launch, measured against `now`.
    ///
    /// `None` when not running, or when the clock went backwards.
    pub fn uptime(&self, now: DateTime<Utc>) -> Option<Duration> {
        let started_at = self.started_at.filter(|_| self.running)?;
        (now - started_at).to_std().ok()
    }
}
