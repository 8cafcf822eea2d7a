//! Process inspection capability.

use crate::domain::ManagedProcessState;

/// Answers liveness and identity questions about a PID.
///
/// Two implementations exist in `waqt-runtime`: a rich one backed by a
/// process table (command lines available) and a minimal one built from
/// platform primitives. The choice is made once at startup; callers only
/// ever see this trait.
pub trait ProcessInspector: Send + Sync {
    /// Short name for diagnostics (`"sysinfo"`, `"minimal"`).
    fn name(&self) -> &'static str;

    /// Whether `pid` denotes a live (non-zombie) process.
    ///
    /// Non-positive PIDs are never running.
    fn is_running(&self, pid: i64) -> bool;

    /// Whether `pid` is plausibly the server described by `claim`, rather than
    /// an unrelated process that inherited a reused PID.
    ///
    /// Returns `false` whenever identity cannot be established.
    fn is_ours(&self, pid: i64, claim: &ManagedProcessState) -> bool;
}
