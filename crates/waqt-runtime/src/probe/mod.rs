//! Process and port probes.
//!
//! - [`PortProbe`]: is a TCP address already bound
//! - [`SystemProcessControl`]: sends [`ProcessAction`]s using the platform table
//! - [`MinimalInspector`]: liveness via platform primitives, composite identity check
//! - `SysinfoInspector` (feature `sysinfo`): process-table lookup, checked
//!   against a [`ServerIdentity`] (executable, arguments)
//!
//! [`select_inspector`] picks the richest available inspector once; callers
//! only hold `Arc<dyn ProcessInspector>`.

mod identity;
mod minimal;
mod platform;
mod port;
#[cfg(feature = "sysinfo")]
mod rich;

use std::sync::Arc;

use tracing::debug;
use waqt_core::{ProcessControl, ProcessInspector};

pub use identity::ServerIdentity;
pub use minimal::MinimalInspector;
pub use platform::{PlatformCommand, SystemProcessControl, platform_command};
pub use port::{PortProbe, is_port_available};
#[cfg(feature = "sysinfo")]
pub use rich::SysinfoInspector;

/// Choose the process inspector for this run.
///
/// Uses the `sysinfo`-backed inspector when the feature is compiled in and the
/// platform is supported, otherwise the minimal fallback built on `control`
/// and `ports`.
pub fn select_inspector(
    identity: &ServerIdentity,
    control: Arc<dyn ProcessControl>,
    ports: PortProbe,
) -> Arc<dyn ProcessInspector> {
    if let Some(inspector) = rich_inspector(identity) {
        debug!("Using {} process inspector", inspector.name());
        return inspector;
    }

    debug!("Rich process inspection unavailable, using minimal inspector");
    Arc::new(MinimalInspector::new(control, ports))
}

#[cfg(feature = "sysinfo")]
fn rich_inspector(identity: &ServerIdentity) -> Option<Arc<dyn ProcessInspector>> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Some(Arc::new(SysinfoInspector::with_identity(identity.clone())))
    } else {
        None
    }
}

#[cfg(not(feature = "sysinfo"))]
fn rich_inspector(_identity: &ServerIdentity) -> Option<Arc<dyn ProcessInspector>> {
    None
}
