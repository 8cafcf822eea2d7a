//! Core domain types, port definitions and path resolution for waqt.
//!
//! This crate has no OS-level side effects beyond path resolution. Process
//! inspection, signalling and spawning live in `waqt-runtime`, which
//! implements the traits defined in [`ports`].
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{ManagedProcessState, ServerStatus};
pub use paths::{DATA_DIR_ENV, PathError, WaqtPaths, data_root};
pub use ports::{ControlError, LifecycleError, ProcessAction, ProcessControl, ProcessInspector};

// Dev-dependencies used only by unit tests
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
