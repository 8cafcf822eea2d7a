//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the lifecycle infrastructure is
//! wired together for the CLI:
//! - Paths (via waqt-core)
//! - Process control, port probe and inspector selection (via waqt-runtime)
//! - The launch command for the background server, which is this same
//!   binary re-invoked as `waqt ui serve`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use waqt_core::{DATA_DIR_ENV, ProcessControl, WaqtPaths};
use waqt_runtime::{
    HOST_PLACEHOLDER, LifecycleTimings, PORT_PLACEHOLDER, PortProbe, ServerCommand,
    ServerIdentity, ServerManager, SystemProcessControl, select_inspector,
};

/// Command-line token that identifies a process as our UI server when its
/// executable cannot be read.
pub const IDENTITY_TOKEN: &str = "waqt";

/// Subcommand the launched server runs under.
const SERVE_ARGS: [&str; 2] = ["ui", "serve"];

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Resolved data directory layout.
    pub paths: WaqtPaths,
    /// Program launched by `ui start`.
    pub server_program: PathBuf,
    /// Token the inspector looks for in the tracked process.
    pub identity_token: String,
    /// Grace periods and stop poll budget.
    pub timings: LifecycleTimings,
}

impl CliConfig {
    /// Create config for this binary.
    ///
    /// `data_dir` comes from `--data-dir` (or its environment variable);
    /// without it the platform data directory is used. A relative directory
    /// is anchored at the current directory, since the server child runs
    /// from inside it.
    pub fn with_defaults(data_dir: Option<PathBuf>) -> Result<Self> {
        let paths = match data_dir {
            Some(dir) => WaqtPaths::from_data_dir(
                std::path::absolute(&dir)
                    .with_context(|| format!("Invalid data directory {}", dir.display()))?,
            ),
            None => WaqtPaths::resolve()?,
        };
        let server_program =
            std::env::current_exe().context("Failed to locate the waqt executable")?;

        Ok(Self {
            paths,
            server_program,
            identity_token: IDENTITY_TOKEN.to_string(),
            timings: LifecycleTimings::default(),
        })
    }

    /// `<program> ui serve --host {host} --port {port}`, run from the data
    /// directory with the data directory exported to the child.
    pub fn server_command(&self) -> ServerCommand {
        let data_dir = self.paths.data_dir();
        ServerCommand::new(self.server_program.clone())
            .args(SERVE_ARGS)
            .args(["--host", HOST_PLACEHOLDER, "--port", PORT_PLACEHOLDER])
            .env(DATA_DIR_ENV, data_dir)
            .current_dir(data_dir)
    }

    /// How the inspector recognises the server launched by [`Self::server_command`].
    pub fn server_identity(&self) -> ServerIdentity {
        ServerIdentity::new(self.identity_token.clone())
            .with_executable(&self.server_program)
            .with_args(SERVE_ARGS)
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    manager: ServerManager,
}

impl CliContext {
    pub const fn manager(&self) -> &ServerManager {
        &self.manager
    }

    pub const fn paths(&self) -> &WaqtPaths {
        self.manager.paths()
    }
}

/// Bootstrap the CLI application.
///
/// This is the composition root. It:
/// 1. Creates the platform process control and port probe
/// 2. Selects the richest process inspector available
/// 3. Builds the server launch command
/// 4. Assembles the `ServerManager`
pub fn bootstrap(config: CliConfig) -> CliContext {
    let control: Arc<dyn ProcessControl> = Arc::new(SystemProcessControl);
    let ports = PortProbe;
    let inspector = select_inspector(&config.server_identity(), Arc::clone(&control), ports);

    debug!(
        data_dir = %config.paths.data_dir().display(),
        program = %config.server_program.display(),
        inspector = inspector.name(),
        "CLI bootstrap complete"
    );

    let command = config.server_command();
    let manager = ServerManager::new(config.paths, command, inspector, control, ports)
        .with_timings(config.timings);

    CliContext { manager }
}
