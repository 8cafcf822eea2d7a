//! Platform table: logical process actions to OS primitives.
//!
//! | action         | Unix            | Windows                              |
//! |----------------|-----------------|--------------------------------------|
//! | `CheckAlive`   | null signal     | `tasklist /FI "PID eq <pid>" /NH /FO CSV` |
//! | `GracefulStop` | `SIGTERM`       | `taskkill /PID <pid>`                |
//! | `ForceStop`    | `SIGKILL`       | `taskkill /PID <pid> /F`             |

use waqt_core::{ControlError, ProcessAction, ProcessControl};

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// OS primitive implementing a [`ProcessAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformCommand {
    /// Deliver a signal; `None` is the null signal, which only checks existence.
    #[cfg(unix)]
    Signal(Option<Signal>),
    /// Run a helper program; `{pid}` in `args` is replaced with the target PID.
    #[cfg(windows)]
    Program {
        program: &'static str,
        args: &'static [&'static str],
    },
}

/// Look up the primitive for `action` on this platform.
#[cfg(unix)]
pub const fn platform_command(action: ProcessAction) -> PlatformCommand {
    match action {
        ProcessAction::CheckAlive => PlatformCommand::Signal(None),
        ProcessAction::GracefulStop => PlatformCommand::Signal(Some(Signal::SIGTERM)),
        ProcessAction::ForceStop => PlatformCommand::Signal(Some(Signal::SIGKILL)),
    }
}

/// Look up the primitive for `action` on this platform.
#[cfg(windows)]
pub const fn platform_command(action: ProcessAction) -> PlatformCommand {
    match action {
        ProcessAction::CheckAlive => PlatformCommand::Program {
            program: "tasklist",
            args: &["/FI", "PID eq {pid}", "/NH", "/FO", "CSV"],
        },
        ProcessAction::GracefulStop => PlatformCommand::Program {
            program: "taskkill",
            args: &["/PID", "{pid}"],
        },
        ProcessAction::ForceStop => PlatformCommand::Program {
            program: "taskkill",
            args: &["/PID", "{pid}", "/F"],
        },
    }
}

/// [`ProcessControl`] that executes the platform table against real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessControl;

impl ProcessControl for SystemProcessControl {
    fn send(&self, pid: i64, action: ProcessAction) -> Result<(), ControlError> {
        if pid <= 0 {
            return Err(ControlError::NoSuchProcess);
        }
        execute(platform_command(action), pid, action)
    }
}

#[cfg(unix)]
fn execute(command: PlatformCommand, pid: i64, _action: ProcessAction) -> Result<(), ControlError> {
    let PlatformCommand::Signal(signal) = command;
    let raw = i32::try_from(pid).map_err(|_| ControlError::NoSuchProcess)?;

    match signal::kill(Pid::from_raw(raw), signal) {
        Ok(()) => Ok(()),
        Err(Errno::ESRCH) => Err(ControlError::NoSuchProcess),
        Err(Errno::EPERM) => Err(ControlError::PermissionDenied),
        Err(e) => Err(ControlError::Failed(e.to_string())),
    }
}

#[cfg(windows)]
fn execute(command: PlatformCommand, pid: i64, action: ProcessAction) -> Result<(), ControlError> {
    use std::process::Command;

    let PlatformCommand::Program { program, args } = command;
    let pid_text = pid.to_string();

    let output = Command::new(program)
        .args(args.iter().map(|arg| arg.replace("{pid}", &pid_text)))
        .output()
        .map_err(|e| ControlError::Failed(format!("failed to run {program}: {e}")))?;

    if action == ProcessAction::CheckAlive {
        // CSV rows quote every field: "name.exe","1234",...
        let stdout = String::from_utf8_lossy(&output.stdout);
        return if stdout.contains(&format!("\"{pid_text}\"")) {
            Ok(())
        } else {
            Err(ControlError::NoSuchProcess)
        };
    }

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.contains("not found") {
        Err(ControlError::NoSuchProcess)
    } else if stderr.contains("Access is denied") {
        Err(ControlError::PermissionDenied)
    } else {
        Err(ControlError::Failed(stderr))
    }
}
