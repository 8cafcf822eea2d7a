//! CLI-specific error types and exit-code mapping.

use thiserror::Error;
use waqt_core::{LifecycleError, PathError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Starting, stopping or restarting the UI server failed.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// The data directory could not be resolved.
    #[error("Configuration error: {0}")]
    Paths(#[from] PathError),

    /// Console output or filesystem access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Status could not be serialized.
    #[error("Failed to encode status: {0}")]
    Json(#[from] serde_json::Error),

    /// The foreground web server stopped with an error.
    #[error("Web UI server failed: {0:#}")]
    Server(anyhow::Error),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Lifecycle failures (already running, port in use, spawn failure, not
    /// running, stop timeout) all exit with 1. The rest follow sysexits.h.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Lifecycle(_) | Self::Json(_) | Self::Server(_) => 1,
            Self::Io(_) => 74,    // EX_IOERR
            Self::Paths(_) => 78, // EX_CONFIG
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn lifecycle_failures_exit_with_one() {
        let errors = [
            LifecycleError::AlreadyRunning { pid: 1 },
            LifecycleError::PortInUse {
                host: "127.0.0.1".to_string(),
                port: 5555,
            },
            LifecycleError::NotRunning,
            LifecycleError::GracefulStopTimeout {
                pid: 1,
                waited: Duration::from_secs(5),
            },
            LifecycleError::ForceStopFailure { pid: 1 },
        ];
        for err in errors {
            assert_eq!(CliError::from(err).exit_code(), 1);
        }
    }

    #[test]
    fn lifecycle_message_is_passed_through() {
        let err = CliError::from(LifecycleError::NotRunning);
        assert_eq!(err.to_string(), "UI server is not running");
    }

    #[test]
    fn path_errors_are_configuration_errors() {
        let err = CliError::from(PathError::EmptyOverride("WAQT_DATA_DIR"));
        assert_eq!(err.exit_code(), 78);
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
