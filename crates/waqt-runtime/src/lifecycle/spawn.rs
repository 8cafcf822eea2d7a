//! Detached child spawning with log redirection.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};

use chrono::Utc;

/// Spawn `cmd` detached from the caller's session.
///
/// - stdin is closed
/// - stdout and stderr are appended to `log_path` (created with its parent directory)
/// - Unix: the child starts a new session (`setsid`), so terminal signals
///   sent to the launching CLI never reach it
/// - Windows: `DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP`
pub(super) fn spawn_detached(mut cmd: Command, log_path: &Path) -> io::Result<Child> {
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut log = OpenOptions::new().create(true).append(true).open(log_path)?;
    writeln!(
        log,
        "--- {} launching {} ---",
        Utc::now().to_rfc3339(),
        cmd.get_program().to_string_lossy()
    )?;
    let err_log = log.try_clone()?;

    cmd.stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(err_log));
    detach(&mut cmd);

    cmd.spawn()
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;

    // SAFETY: setsid() is async-signal-safe and is the only call made between
    // fork and exec.
    unsafe {
        cmd.pre_exec(|| nix::unistd::setsid().map(drop).map_err(io::Error::from));
    }
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

/// Last `max_lines` lines of the log, for spawn failure diagnostics.
///
/// Reads at most the final 4 KiB. `None` if the file is unreadable or empty.
pub(super) fn log_tail(log_path: &Path, max_lines: usize) -> Option<String> {
    const TAIL_BYTES: u64 = 4096;

    let mut file = File::open(log_path).ok()?;
    let len = file.metadata().ok()?.len();
    file.seek(SeekFrom::Start(len.saturating_sub(TAIL_BYTES))).ok()?;

    let mut buf = Vec::new();
    file.read_to_end(&mut buf).ok()?;
    let text = String::from_utf8_lossy(&buf);

    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let tail = lines[lines.len().saturating_sub(max_lines)..].join("\n");
    (!tail.is_empty()).then_some(tail)
}
