//! Axum web server for the waqt UI.
//!
//! This is the foreground process that `waqt ui start` launches in the
//! background. It serves the UI shell, a `/health` probe and a small status
//! API, and exits cleanly on Ctrl-C or SIGTERM.
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod routes;

pub use bootstrap::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig, shutdown_signal, start_server};
pub use routes::{AppState, ServerInfo, create_router};
