//! Web UI server management subcommands.

use clap::Subcommand;
use waqt_axum::{DEFAULT_HOST, DEFAULT_PORT};

/// Web UI server management commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum UiCommand {
    /// Start the web UI server in the background
    Start {
        /// Interface to bind
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Stop the background web UI server
    Stop {
        /// Kill immediately instead of asking the server to shut down
        #[arg(short, long)]
        force: bool,
    },

    /// Show whether the web UI server is running
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Stop the web UI server if it is running, then start it again
    Restart {
        /// Interface to bind
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Kill immediately instead of asking the server to shut down
        #[arg(short, long)]
        force: bool,
    },

    /// Run the web UI server in the foreground
    #[command(hide = true)]
    Serve {
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}
