//! Process verification backed by the `sysinfo` process table.

use sysinfo::{Pid, Process, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind};
use tracing::debug;
use waqt_core::{ManagedProcessState, ProcessInspector};

use super::identity::ServerIdentity;

/// Inspector that reads the process table directly.
///
/// A live PID is ours when its command line carries the identity's argument
/// sequence and its executable is the configured binary. The token check only
/// stands in for the executable when none is configured or the OS hides it.
#[derive(Debug, Clone)]
pub struct SysinfoInspector {
    identity: ServerIdentity,
}

impl SysinfoInspector {
    /// Token-only identity.
    pub fn new(identity_token: impl Into<String>) -> Self {
        Self::with_identity(ServerIdentity::new(identity_token))
    }

    pub const fn with_identity(identity: ServerIdentity) -> Self {
        Self { identity }
    }

    fn recognises(&self, process: &Process) -> bool {
        let cmd: Vec<String> = process
            .cmd()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        if !self.identity.args_match(&cmd) {
            debug!(pid = %process.pid(), ?cmd, "Command line lacks the server arguments");
            return false;
        }

        match process.exe().and_then(|exe| self.identity.executable_matches(exe)) {
            Some(matches) => {
                if !matches {
                    debug!(pid = %process.pid(), exe = ?process.exe(), "Executable is not the server binary");
                }
                matches
            }
            None => {
                let name = process.name().to_string_lossy();
                self.identity.token_matches(&name, &cmd)
            }
        }
    }
}

/// Refresh a single process and hand it to `f`; `None` if it does not exist.
fn with_process<T>(pid: i64, refresh: ProcessRefreshKind, f: impl FnOnce(&Process) -> T) -> Option<T> {
    let raw = u32::try_from(pid).ok().filter(|raw| *raw > 0)?;
    let pid = Pid::from_u32(raw);

    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessesToUpdate::Some(&[pid]), true, refresh);
    sys.process(pid).map(f)
}

impl ProcessInspector for SysinfoInspector {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn is_running(&self, pid: i64) -> bool {
        with_process(pid, ProcessRefreshKind::nothing(), |process| {
            process.status() != ProcessStatus::Zombie
        })
        .unwrap_or(false)
    }

    fn is_ours(&self, pid: i64, claim: &ManagedProcessState) -> bool {
        if claim.pid != Some(pid) {
            debug!(pid, recorded = ?claim.pid, "PID does not match the recorded one");
            return false;
        }

        let refresh = ProcessRefreshKind::nothing()
            .with_cmd(UpdateKind::Always)
            .with_exe(UpdateKind::Always);
        with_process(pid, refresh, |process| {
            process.status() != ProcessStatus::Zombie && self.recognises(process)
        })
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::{Child, Command};

    fn claim_for(child: &Child) -> (i64, ManagedProcessState) {
        let pid = i64::from(child.id());
        (pid, ManagedProcessState::new(pid, "127.0.0.1", 5555))
    }

    fn reap(mut child: Child) {
        let _ = child.kill();
        let _ = child.wait();
    }

    /// `sh` stays in the foreground (no exec of the last command) with
    /// `ui serve` as its positional parameters.
    #[cfg(unix)]
    fn spawn_fake_server() -> Child {
        Command::new("sh")
            .args(["-c", "sleep 30; exit 0", "ui", "serve"])
            .spawn()
            .expect("failed to spawn sh")
    }

    fn server_identity(executable: &str) -> ServerIdentity {
        ServerIdentity::new("waqt")
            .with_executable(executable)
            .with_args(["ui", "serve"])
    }

    #[test]
    fn running_for_self() {
        let inspector = SysinfoInspector::new("waqt");
        assert!(inspector.is_running(i64::from(std::process::id())));
    }

    #[test]
    fn not_running_for_impossible_pids() {
        let inspector = SysinfoInspector::new("waqt");
        assert!(!inspector.is_running(0));
        assert!(!inspector.is_running(-1));
        assert!(!inspector.is_running(999_999_999));
    }

    #[test]
    #[cfg(unix)]
    fn token_identity_follows_command_line() {
        let child = Command::new("sleep").arg("30").spawn().expect("failed to spawn sleep");
        let (pid, claim) = claim_for(&child);

        assert!(SysinfoInspector::new("sleep").is_ours(pid, &claim));
        assert!(!SysinfoInspector::new("waqt-ui-server").is_ours(pid, &claim));

        reap(child);
    }

    #[test]
    fn identity_rejects_pid_mismatch() {
        let self_pid = i64::from(std::process::id());
        let claim = ManagedProcessState::new(self_pid + 1, "127.0.0.1", 5555);
        assert!(!SysinfoInspector::new("").is_ours(self_pid, &claim));
    }

    #[test]
    #[cfg(unix)]
    fn server_binary_with_serve_args_is_ours() {
        let child = spawn_fake_server();
        let (pid, claim) = claim_for(&child);

        let inspector = SysinfoInspector::with_identity(server_identity("/bin/sh"));
        assert!(inspector.is_ours(pid, &claim));

        reap(child);
    }

    #[test]
    #[cfg(unix)]
    fn log_tailer_in_data_dir_is_not_ours() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("waqt/logs/ui.log");
        std::fs::create_dir_all(log.parent().unwrap()).unwrap();
        std::fs::write(&log, "").unwrap();

        let child = Command::new("tail")
            .arg("-f")
            .arg(&log)
            .spawn()
            .expect("failed to spawn tail");
        let (pid, claim) = claim_for(&child);

        let exe = std::env::current_exe().unwrap();
        let identity = ServerIdentity::new("waqt")
            .with_executable(&exe)
            .with_args(["ui", "serve"]);
        assert!(!SysinfoInspector::with_identity(identity).is_ours(pid, &claim));

        reap(child);
    }

    #[test]
    #[cfg(unix)]
    fn other_binary_with_serve_args_is_not_ours() {
        let child = spawn_fake_server();
        let (pid, claim) = claim_for(&child);

        let exe = std::env::current_exe().unwrap();
        let identity = ServerIdentity::new("sh")
            .with_executable(&exe)
            .with_args(["ui", "serve"]);
        assert!(!SysinfoInspector::with_identity(identity).is_ours(pid, &claim));

        reap(child);
    }
}
