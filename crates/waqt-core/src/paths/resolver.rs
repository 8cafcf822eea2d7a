//! Resolved on-disk layout for one data directory.

use std::fmt;
use std::path::{Path, PathBuf};

use super::{PathError, data_root};

/// File name of the UI server state record.
pub const STATE_FILE_NAME: &str = "waqt_server.json";
/// Directory (under the data root) holding log files.
pub const LOGS_DIR_NAME: &str = "logs";
/// File receiving the spawned UI server's stdout/stderr.
pub const LOG_FILE_NAME: &str = "ui.log";

/// All paths derived from a single data directory.
///
/// Construct once at process entry and hand clones to the components that
/// need them. Tests build one over a temporary directory with
/// [`WaqtPaths::from_data_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaqtPaths {
    data_dir: PathBuf,
}

impl WaqtPaths {
    /// Resolve the data directory from the environment.
    pub fn resolve() -> Result<Self, PathError> {
        Ok(Self::from_data_dir(data_root()?))
    }

    /// Use an explicit data directory.
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `<data_dir>/waqt_server.json`
    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE_NAME)
    }

    /// `<data_dir>/logs`
    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join(LOGS_DIR_NAME)
    }

    /// `<data_dir>/logs/ui.log`
    pub fn ui_log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }
}

impl fmt::Display for WaqtPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "data_dir = {}", self.data_dir.display())?;
        writeln!(f, "state_file = {}", self.state_file().display())?;
        write!(f, "log_file = {}", self.ui_log_file().display())
    }
}
