//! TCP port availability checks.

use std::net::TcpListener;
use tracing::debug;

/// Check if `host:port` is free by attempting to bind to it.
/// The listener is dropped immediately, which releases the port.
pub fn is_port_available(host: &str, port: u16) -> bool {
    match TcpListener::bind((host, port)) {
        Ok(listener) => listener.local_addr().is_ok(),
        Err(e) => {
            debug!(host = %host, port = %port, "Bind failed: {}", e);
            false
        }
    }
}

/// Answers whether something already holds a TCP address.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortProbe;

impl PortProbe {
    /// `true` when binding `(host, port)` fails.
    pub fn is_in_use(&self, host: &str, port: u16) -> bool {
        !is_port_available(host, port)
    }
}
