//! Process runtime and OS-level concerns for waqt.
//!
//! - [`state`]: the atomic JSON state store
//! - [`probe`]: process inspectors, the platform action table, port probing
//! - [`lifecycle`]: [`ServerManager`], which launches, tracks and stops the
//!   background UI server
#![deny(unused_crate_dependencies)]

pub mod lifecycle;
pub mod probe;
pub mod state;

pub use lifecycle::{
    HOST_PLACEHOLDER, LifecycleTimings, PORT_PLACEHOLDER, ServerCommand, ServerManager,
    StartOutcome, StopOutcome,
};
pub use probe::{
    MinimalInspector, PortProbe, ServerIdentity, SystemProcessControl, select_inspector,
};
#[cfg(feature = "sysinfo")]
pub use probe::SysinfoInspector;
pub use state::StateStore;
