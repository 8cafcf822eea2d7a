//! Path utilities for waqt data directories.
//!
//! This module provides the canonical path resolution for all waqt components:
//! - Data root (`WAQT_DATA_DIR` or the per-user data directory)
//! - UI server state file
//! - UI server log file
//!
//! # Design
//!
//! - Paths are resolved once at process entry into a [`WaqtPaths`] value and
//!   passed down explicitly; nothing below the composition root reads the
//!   environment
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - OS-specific logic is kept private in `platform`

mod error;
mod platform;
mod resolver;

// Error type
pub use error::PathError;

// Platform detection and roots
pub use platform::{DATA_DIR_ENV, data_root};

// Resolved layout
pub use resolver::{LOG_FILE_NAME, LOGS_DIR_NAME, STATE_FILE_NAME, WaqtPaths};
