//! In-memory process table and recording control for lifecycle unit tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use waqt_core::{
    ControlError, ManagedProcessState, ProcessAction, ProcessControl, ProcessInspector, WaqtPaths,
};

use super::{LifecycleTimings, ServerCommand, ServerManager};
use crate::probe::PortProbe;
use crate::state::StateStore;

#[derive(Debug, Clone, Copy)]
struct FakeProcess {
    ours: bool,
    ignores_term: bool,
    unkillable: bool,
}

/// Process table double: PIDs are "alive" while present.
#[derive(Default)]
pub(crate) struct FakeProcesses {
    table: Mutex<HashMap<i64, FakeProcess>>,
}

impl FakeProcesses {
    fn insert(&self, pid: i64, process: FakeProcess) {
        self.table.lock().unwrap().insert(pid, process);
    }

    pub(crate) fn spawn_ours(&self, pid: i64) {
        self.insert(pid, FakeProcess { ours: true, ignores_term: false, unkillable: false });
    }

    pub(crate) fn spawn_foreign(&self, pid: i64) {
        self.insert(pid, FakeProcess { ours: false, ignores_term: false, unkillable: false });
    }

    pub(crate) fn spawn_ignoring_term(&self, pid: i64) {
        self.insert(pid, FakeProcess { ours: true, ignores_term: true, unkillable: false });
    }

    pub(crate) fn spawn_unkillable(&self, pid: i64) {
        self.insert(pid, FakeProcess { ours: true, ignores_term: true, unkillable: true });
    }

    fn deliver(&self, pid: i64, action: ProcessAction) -> Result<(), ControlError> {
        let mut table = self.table.lock().unwrap();
        let process = *table.get(&pid).ok_or(ControlError::NoSuchProcess)?;
        let dies = match action {
            ProcessAction::CheckAlive => false,
            ProcessAction::GracefulStop => !process.ignores_term,
            ProcessAction::ForceStop => !process.unkillable,
        };
        if dies {
            table.remove(&pid);
        }
        Ok(())
    }
}

impl ProcessInspector for FakeProcesses {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_running(&self, pid: i64) -> bool {
        pid > 0 && self.table.lock().unwrap().contains_key(&pid)
    }

    fn is_ours(&self, pid: i64, claim: &ManagedProcessState) -> bool {
        claim.pid == Some(pid)
            && self
                .table
                .lock()
                .unwrap()
                .get(&pid)
                .is_some_and(|process| process.ours)
    }
}

/// Control double that records every request and applies it to [`FakeProcesses`].
pub(crate) struct RecordingControl {
    processes: Arc<FakeProcesses>,
    sent: Mutex<Vec<(i64, ProcessAction)>>,
}

impl RecordingControl {
    pub(crate) fn sent(&self) -> Vec<(i64, ProcessAction)> {
        self.sent.lock().unwrap().clone()
    }
}

impl ProcessControl for RecordingControl {
    fn send(&self, pid: i64, action: ProcessAction) -> Result<(), ControlError> {
        self.sent.lock().unwrap().push((pid, action));
        self.processes.deliver(pid, action)
    }
}

pub(crate) fn fast_timings() -> LifecycleTimings {
    LifecycleTimings {
        startup_grace: Duration::from_millis(10),
        port_grace: Duration::from_millis(10),
        stop_poll_interval: Duration::from_millis(5),
        stop_poll_attempts: 4,
    }
}

/// A manager over a temporary data directory wired to the doubles above.
pub(crate) struct Harness {
    pub(crate) dir: tempfile::TempDir,
    pub(crate) manager: ServerManager,
    pub(crate) processes: Arc<FakeProcesses>,
    pub(crate) control: Arc<RecordingControl>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let processes = Arc::new(FakeProcesses::default());
        let control = Arc::new(RecordingControl {
            processes: Arc::clone(&processes),
            sent: Mutex::new(Vec::new()),
        });

        let manager = ServerManager::new(
            WaqtPaths::from_data_dir(dir.path()),
            ServerCommand::new(dir.path().join("no-such-server-binary")),
            processes.clone(),
            control.clone(),
            PortProbe,
        )
        .with_timings(fast_timings());

        Self {
            dir,
            manager,
            processes,
            control,
        }
    }

    pub(crate) fn state_path(&self) -> PathBuf {
        self.manager.paths().state_file()
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.manager.paths().ui_log_file()
    }

    pub(crate) fn record(&self, state: ManagedProcessState) {
        StateStore::new(self.state_path())
            .write(&state)
            .expect("write state");
    }
}
