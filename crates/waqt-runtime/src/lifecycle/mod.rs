//! Background UI server lifecycle: launch, track, verify, stop.
//!
//! [`ServerManager`] composes the state store, process inspector, process
//! control and port probe. It is built once at the composition root and all
//! operations run through it:
//!
//! - [`ServerManager::status`] answers "is it running" and heals stale state
//! - [`ServerManager::start`] spawns the detached server and records it
//! - [`ServerManager::stop`] signals the tracked server and waits for exit
//!
//! # Concurrency
//!
//! Exclusion between separate CLI invocations is check-then-act on the state
//! file and the port. Two `start`s racing each other can both pass the
//! "not running" check before either writes state. No lock file is taken;
//! single-operator use is assumed.

mod launch;
mod spawn;
mod status;
mod stop;
#[cfg(test)]
pub(crate) mod test_support;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use waqt_core::{ProcessControl, ProcessInspector, WaqtPaths};

use crate::probe::PortProbe;
use crate::state::StateStore;

pub use launch::StartOutcome;
pub use stop::StopOutcome;

/// Placeholder in [`ServerCommand`] arguments replaced by the bind host.
pub const HOST_PLACEHOLDER: &str = "{host}";
/// Placeholder in [`ServerCommand`] arguments replaced by the bind port.
pub const PORT_PLACEHOLDER: &str = "{port}";

/// Fixed waits and poll budgets used by start and stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleTimings {
    /// Wait after spawning before confirming the child survived.
    pub startup_grace: Duration,
    /// Further wait after recording state before checking the port is bound.
    pub port_grace: Duration,
    /// Sleep between liveness checks while stopping.
    pub stop_poll_interval: Duration,
    /// Number of liveness checks while stopping.
    pub stop_poll_attempts: u32,
}

impl LifecycleTimings {
    /// Total time `stop` waits for the process to exit.
    pub fn stop_budget(&self) -> Duration {
        self.stop_poll_interval * self.stop_poll_attempts
    }
}

impl Default for LifecycleTimings {
    fn default() -> Self {
        Self {
            startup_grace: Duration::from_millis(500),
            port_grace: Duration::from_secs(1),
            stop_poll_interval: Duration::from_millis(500),
            stop_poll_attempts: 10,
        }
    }
}

/// Command line used to launch the UI server.
///
/// `{host}` and `{port}` inside arguments are substituted at launch time.
#[derive(Debug, Clone)]
pub struct ServerCommand {
    program: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, OsString)>,
    current_dir: Option<PathBuf>,
}

impl ServerCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments with placeholders substituted for `host`/`port`.
    pub fn render_args(&self, host: &str, port: u16) -> Vec<String> {
        let port = port.to_string();
        self.args
            .iter()
            .map(|arg| arg.replace(HOST_PLACEHOLDER, host).replace(PORT_PLACEHOLDER, &port))
            .collect()
    }

    fn build(&self, host: &str, port: u16) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.render_args(host, port));
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Owns everything needed to manage the background UI server of one data directory.
pub struct ServerManager {
    paths: WaqtPaths,
    store: StateStore,
    inspector: Arc<dyn ProcessInspector>,
    control: Arc<dyn ProcessControl>,
    ports: PortProbe,
    command: ServerCommand,
    timings: LifecycleTimings,
}

impl ServerManager {
    pub fn new(
        paths: WaqtPaths,
        command: ServerCommand,
        inspector: Arc<dyn ProcessInspector>,
        control: Arc<dyn ProcessControl>,
        ports: PortProbe,
    ) -> Self {
        Self {
            store: StateStore::for_paths(&paths),
            paths,
            inspector,
            control,
            ports,
            command,
            timings: LifecycleTimings::default(),
        }
    }

    #[must_use]
    pub const fn with_timings(mut self, timings: LifecycleTimings) -> Self {
        self.timings = timings;
        self
    }

    pub const fn paths(&self) -> &WaqtPaths {
        &self.paths
    }

    pub const fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn inspector(&self) -> &dyn ProcessInspector {
        self.inspector.as_ref()
    }

    pub const fn timings(&self) -> &LifecycleTimings {
        &self.timings
    }

    /// Stop the tracked server if there is one, then start a new one.
    pub async fn restart(
        &self,
        host: &str,
        port: u16,
        force: bool,
    ) -> Result<StartOutcome, waqt_core::LifecycleError> {
        match self.stop(force).await {
            Ok(_) | Err(waqt_core::LifecycleError::NotRunning) => {}
            Err(e) => return Err(e),
        }
        self.start(host, port).await
    }
}
