//! Server status display for `waqt ui status`.

use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use waqt_core::ServerStatus;

/// Formats an uptime as `1h 02m 03s`, `4m 05s` or `6s`.
///
/// ```rust
/// use std::time::Duration;
/// use waqt_cli::presentation::format_uptime;
///
/// assert_eq!(format_uptime(Duration::from_secs(3723)), "1h 02m 03s");
/// assert_eq!(format_uptime(Duration::from_secs(42)), "42s");
/// ```
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

/// Human-readable status block.
pub fn render_status(status: &ServerStatus, log_path: &Path, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    if !status.running {
        out.push_str("UI server is not running");
        if status.was_stale {
            out.push_str("\n  (removed stale state for a process that is gone)");
        }
        return out;
    }

    out.push_str("UI server is running");
    if let Some(pid) = status.pid {
        let _ = write!(out, "\n  PID:     {pid}");
    }
    if let (Some(host), Some(port)) = (&status.host, status.port) {
        let _ = write!(out, "\n  URL:     http://{host}:{port}");
    }
    if let Some(started_at) = status.started_at {
        let _ = write!(out, "\n  Started: {}", started_at.format("%Y-%m-%d %H:%M:%S UTC"));
        if let Some(uptime) = status.uptime(now) {
            let _ = write!(out, " (up {})", format_uptime(uptime));
        }
    }
    let _ = write!(out, "\n  Log:     {}", log_path.display());
    out
}

/// Machine-readable status: the status fields plus `uptime_secs` and `log_file`.
pub fn status_json(
    status: &ServerStatus,
    log_path: &Path,
    now: DateTime<Utc>,
) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(status)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "uptime_secs".to_string(),
            status.uptime(now).map_or(Value::Null, |d| d.as_secs().into()),
        );
        map.insert(
            "log_file".to_string(),
            Value::String(log_path.display().to_string()),
        );
    }
    Ok(value)
}
