//! Platform-specific data root resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "WAQT_DATA_DIR";

/// Get the root directory for application data (state file, logs).
///
/// Resolution order:
/// 1. `WAQT_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/waqt`)
pub fn data_root() -> Result<PathBuf, PathError> {
    // 1. Runtime override (highest priority)
    if let Some(raw) = env::var_os(DATA_DIR_ENV) {
        if raw.is_empty() {
            return Err(PathError::EmptyOverride(DATA_DIR_ENV));
        }
        return Ok(PathBuf::from(raw));
    }

    // 2. Default to system data directory
    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;

    let root = data_dir.join("waqt");

    // Ensure it exists
    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}
