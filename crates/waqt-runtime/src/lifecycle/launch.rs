//! Launching the detached UI server.

use std::path::PathBuf;
use std::process::Child;

use tokio::time::sleep;
use tracing::{debug, info, warn};
use waqt_core::{LifecycleError, ManagedProcessState, ProcessAction};

use super::ServerManager;
use super::spawn::{log_tail, spawn_detached};

/// Lines of log output quoted in a spawn failure.
const FAILURE_LOG_LINES: usize = 10;

/// A successfully launched and recorded UI server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    pub pid: i64,
    pub host: String,
    pub port: u16,
    pub log_path: PathBuf,
    /// Set when the process is alive and tracked but had not bound its port
    /// by the end of the grace period.
    pub warning: Option<String>,
}

impl ServerManager {
    /// Launch the UI server in the background.
    ///
    /// # Strategy
    /// 1. Refuse if a verified server is already tracked
    /// 2. Refuse if `host:port` is already bound (nothing is spawned)
    /// 3. Spawn detached with output appended to `logs/ui.log`
    /// 4. Wait for the startup grace period, fail if the child already exited
    /// 5. Record state only once the child is confirmed alive
    /// 6. Wait for the port grace period; an unbound port is only a warning
    pub async fn start(&self, host: &str, port: u16) -> Result<StartOutcome, LifecycleError> {
        let status = self.status();
        if let Some(pid) = status.pid.filter(|_| status.running) {
            return Err(LifecycleError::AlreadyRunning { pid });
        }

        if self.ports.is_in_use(host, port) {
            return Err(LifecycleError::PortInUse {
                host: host.to_string(),
                port,
            });
        }

        let log_path = self.paths.ui_log_file();
        let mut child = spawn_detached(self.command.build(host, port), &log_path)
            .map_err(LifecycleError::Launch)?;
        let pid = i64::from(child.id());
        info!(pid, host, port, "Spawned UI server");

        sleep(self.timings.startup_grace).await;

        if let Some(exit) = self.exit_during_startup(&mut child, pid) {
            warn!(pid, "UI server exited during startup: {}", exit);
            let detail = match log_tail(&log_path, FAILURE_LOG_LINES) {
                Some(tail) => format!("{exit}; last log lines:\n{tail}"),
                None => exit,
            };
            return Err(LifecycleError::SpawnFailure { log_path, detail });
        }

        let state = ManagedProcessState::new(pid, host, port);
        if let Err(e) = self.store.write(&state) {
            // Never leave an untracked server behind.
            warn!(pid, "Failed to record UI server state, killing it: {}", e);
            let _ = self.control.send(pid, ProcessAction::ForceStop);
            let _ = child.wait();
            return Err(LifecycleError::State(e));
        }
        debug!(pid, path = %self.store.path().display(), "Recorded UI server state");

        sleep(self.timings.port_grace).await;

        let warning = (!self.ports.is_in_use(host, port)).then(|| {
            format!(
                "UI server (PID {pid}) is running but not yet listening on {host}:{port}; it may still be initializing (see {})",
                log_path.display()
            )
        });
        if let Some(message) = &warning {
            warn!("{}", message);
        }

        Ok(StartOutcome {
            pid,
            host: host.to_string(),
            port,
            log_path,
            warning,
        })
    }

    /// Describe how the child exited, or `None` while it is still alive.
    fn exit_during_startup(&self, child: &mut Child, pid: i64) -> Option<String> {
        match child.try_wait() {
            Ok(Some(status)) => Some(format!("process {status}")),
            Ok(None) => None,
            Err(e) => {
                debug!(pid, "try_wait failed, falling back to inspector: {}", e);
                (!self.inspector.is_running(pid)).then(|| "process is no longer running".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use std::net::TcpListener;
    use waqt_core::{LifecycleError, ManagedProcessState};

    #[tokio::test]
    async fn refuses_when_already_running() {
        let harness = Harness::new();
        harness.processes.spawn_ours(4242);
        let state = ManagedProcessState::new(4242, "127.0.0.1", 5555);
        harness.record(state.clone());

        let err = harness.manager.start("127.0.0.1", 5555).await.unwrap_err();

        assert!(matches!(err, LifecycleError::AlreadyRunning { pid: 4242 }));
        assert!(err.to_string().contains("already running"));
        // Existing record untouched
        assert_eq!(harness.manager.store().read(), Some(state));
        assert!(!harness.log_path().exists());
    }

    #[tokio::test]
    async fn busy_port_short_circuits_before_spawn() {
        let harness = Harness::new();
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();

        let err = harness.manager.start("127.0.0.1", port).await.unwrap_err();

        assert!(matches!(err, LifecycleError::PortInUse { port: p, .. } if p == port));
        assert!(err.to_string().contains("already in use"));
        assert!(!harness.log_path().exists());
        assert!(!harness.state_path().exists());
    }

    #[tokio::test]
    async fn missing_binary_is_a_launch_error_without_state() {
        let harness = Harness::new();
        let port = TcpListener::bind(("127.0.0.1", 0))
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let err = harness.manager.start("127.0.0.1", port).await.unwrap_err();

        assert!(matches!(err, LifecycleError::Launch(_)));
        assert!(!harness.state_path().exists());
    }

    #[tokio::test]
    async fn stale_record_does_not_block_start() {
        let harness = Harness::new();
        harness.record(ManagedProcessState::new(4242, "127.0.0.1", 5555));
        let port = TcpListener::bind(("127.0.0.1", 0))
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        // Dead PID is healed; the launch itself then fails on the missing binary.
        let err = harness.manager.start("127.0.0.1", port).await.unwrap_err();

        assert!(matches!(err, LifecycleError::Launch(_)));
        assert!(!harness.state_path().exists());
    }
}
