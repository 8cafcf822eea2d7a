//! Command-line interface for waqt.
//!
//! The `waqt` binary parses arguments, composes a [`CliContext`] in
//! [`bootstrap`], and dispatches to [`handlers`].
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by main.rs binary
use dotenvy as _;
use tokio as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod presentation;
pub mod ui_commands;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, IDENTITY_TOKEN, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use logging::{LogSettings, init_tracing};
pub use parser::Cli;
pub use ui_commands::UiCommand;
